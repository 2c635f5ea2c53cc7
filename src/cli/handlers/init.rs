use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::store::atomic_write;
use crate::io::workspace;

const TWIG_TOML_TEMPLATE: &str = r#"[workspace]
name = "{name}"

[save]
# Quiet period (ms) before a debounced write hits disk.
debounce_ms = 500
"#;

/// Infer a workspace name from a directory name: replace hyphens with
/// spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let data_dir = cwd.join("twig");

    if data_dir.is_dir() && !args.force {
        return Err("twig workspace already exists in ./twig/ (use --force to reinitialize)".into());
    }

    // Warn when nesting under another workspace
    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = workspace::discover_workspace(parent)
    {
        eprintln!("Note: parent workspace found at {}/twig/", parent_root.display());
        eprintln!("Creating new workspace in ./twig/");
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Untitled".to_string())
    });

    fs::create_dir_all(&data_dir)?;
    fs::write(
        data_dir.join("twig.toml"),
        TWIG_TOML_TEMPLATE.replace("{name}", &name),
    )?;

    // Seed the stores so first reads see empty collections
    for file in ["todos.json", "timer-sessions.json", "timeboxes.json"] {
        let path = data_dir.join(file);
        if !path.exists() || args.force {
            atomic_write(&path, b"[]")?;
        }
    }

    println!("Initialized twig workspace: {}", name);
    Ok(())
}
