use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

const STARTER_MANIFEST: &str = r#"# Route manifest for vue-routes
[output]
destination = "src/router/routes.js"
extended = false
indent = 4

[[routes]]
path = "/"
component = "@/views/Home.vue"

[routes.attributes]
name = "home"
meta = { in_navigation = "1", title = "Home" }

[[routes]]
path = "/admin"
component = "@/views/Admin.vue"

[routes.attributes]
name = "admin"

[[routes.children]]
path = "users"
component = "@/views/admin/Users.vue"
order = 1
"#;

pub fn execute(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, STARTER_MANIFEST)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("  {} {}", "✓".green(), path.display());
    println!();
    println!("Next steps:");
    println!("  vue-routes check --manifest {}", path.display());
    println!("  vue-routes generate --manifest {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vue_routes::{MemoryWriter, RouteManifest};

    #[test]
    fn test_starter_manifest_is_valid() {
        let manifest: RouteManifest = STARTER_MANIFEST.parse().unwrap();
        let tree = manifest.build_tree_with(MemoryWriter::new()).unwrap();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config/routes.toml");

        execute(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_MANIFEST);
        assert!(execute(&path).is_err());
    }
}
