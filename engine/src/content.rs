use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::behavior::Behavior;
use crate::enemy::{EnemyTemplate, ModuleSpec};

/// Where enemy definitions and action modules come from.
pub trait ContentProvider {
    fn enemy_definition(&self, enemy_type: &str) -> Result<EnemyTemplate>;

    /// A capability module with stock parameters.
    fn action_module(&self, name: &str) -> Result<Box<dyn Behavior>> {
        ModuleSpec::named(name)
            .map(|spec| spec.build())
            .ok_or_else(|| anyhow!("unknown action module '{}'", name))
    }

    /// Every enemy type this provider knows, sorted.
    fn enemy_types(&self) -> Result<Vec<String>>;
}

pub fn builtin_enemies() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("goblin", include_str!("../content/enemies/goblin.yaml")),
        ("shadow_wraith", include_str!("../content/enemies/shadow_wraith.yaml")),
        ("ember_imp", include_str!("../content/enemies/ember_imp.yaml")),
        ("frost_sprite", include_str!("../content/enemies/frost_sprite.yaml")),
        ("marsh_viper", include_str!("../content/enemies/marsh_viper.yaml")),
        ("maze_master", include_str!("../content/enemies/maze_master.yaml")),
    ])
}

/// Content compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinContent;

impl ContentProvider for BuiltinContent {
    fn enemy_definition(&self, enemy_type: &str) -> Result<EnemyTemplate> {
        let enemies = builtin_enemies();
        let text = enemies
            .get(enemy_type)
            .ok_or_else(|| anyhow!("enemy '{}' not found in built-in content", enemy_type))?;
        parse_template(text)
            .with_context(|| format!("failed to parse built-in enemy: {}", enemy_type))
    }

    fn enemy_types(&self) -> Result<Vec<String>> {
        let mut types: Vec<String> = builtin_enemies().keys().map(|k| k.to_string()).collect();
        types.sort();
        Ok(types)
    }
}

/// Enemy definitions read from `<root>/<type>.yaml`.
#[derive(Debug, Clone)]
pub struct DirContent {
    root: PathBuf,
}

impl DirContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentProvider for DirContent {
    fn enemy_definition(&self, enemy_type: &str) -> Result<EnemyTemplate> {
        let path = self.root.join(format!("{}.yaml", enemy_type));
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read enemy YAML: {}", path.display()))?;
        parse_template(&text)
            .with_context(|| format!("failed to parse enemy YAML: {}", path.display()))
    }

    fn enemy_types(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to list enemy directory: {}", self.root.display()))?;
        let mut types = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    types.push(stem.to_string());
                }
            }
        }
        types.sort();
        Ok(types)
    }
}

pub fn parse_template(text: &str) -> Result<EnemyTemplate> {
    Ok(serde_yaml::from_str(text)?)
}
