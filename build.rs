use std::collections::BTreeSet;
use std::error::Error;
use std::{ fs, path::Path, path::PathBuf };
use serde_json::{ Value, Map };
use anyhow::{ Result, bail };

fn main() -> Result<(), Box<dyn Error>> {
    let messages_dir = find_messages_directory()?;
    let out_path = Path::new(&std::env::var("OUT_DIR")?).join("all_translations.json");

    println!("cargo:rerun-if-changed={}", messages_dir.display());

    // Always create the file, even if empty, so include_str! works
    if !messages_dir.exists() {
        println!("cargo:warning=No messages/ folder found, bundling an empty table");
        fs::write(out_path, "{}")?;
        return Ok(());
    }

    let translations = build_translations(&messages_dir)?;
    warn_on_key_set_mismatch(&translations);
    fs::write(out_path, serde_json::to_string_pretty(&translations)?)?;

    Ok(())
}

/// Merges every `messages/<locale>/*.json` file into one flat object per locale.
fn build_translations(messages_dir: &Path) -> Result<Map<String, Value>> {
    let mut translations = Map::new();

    for lang_entry in fs::read_dir(messages_dir)? {
        let lang_dir = lang_entry?;
        if !lang_dir.file_type()?.is_dir() {
            continue;
        }

        let lang_code = lang_dir.file_name().to_string_lossy().to_string();
        let mut strings = Map::new();

        let mut files: Vec<PathBuf> = fs::read_dir(lang_dir.path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();

        for file_path in files {
            println!("cargo:rerun-if-changed={}", file_path.display());

            let content = fs::read_to_string(&file_path)?;
            let json: Value = serde_json::from_str(&content)?;
            let Some(obj) = json.as_object() else {
                bail!("{} must contain a JSON object", file_path.display());
            };

            for (key, value) in obj {
                let Some(text) = value.as_str() else {
                    bail!("{}: value of '{}' is not a string", file_path.display(), key);
                };
                if strings.insert(key.clone(), Value::String(text.to_string())).is_some() {
                    bail!("duplicate key '{}' in locale '{}' ({})", key, lang_code, file_path.display());
                }
            }
        }
        translations.insert(lang_code, Value::Object(strings));
    }

    Ok(translations)
}

fn warn_on_key_set_mismatch(translations: &Map<String, Value>) {
    let key_sets: Vec<(&String, BTreeSet<&String>)> = translations
        .iter()
        .filter_map(|(lang, strings)| strings.as_object().map(|obj| (lang, obj.keys().collect())))
        .collect();

    let Some((reference_lang, reference_keys)) = key_sets.first() else {
        return;
    };

    for (lang, keys) in key_sets.iter().skip(1) {
        for missing in reference_keys.difference(keys) {
            println!("cargo:warning=locale '{}' is missing key '{}' (present in '{}')", lang, missing, reference_lang);
        }
        for extra in keys.difference(reference_keys) {
            println!("cargo:warning=locale '{}' has extra key '{}' (absent from '{}')", lang, extra, reference_lang);
        }
    }
}

fn find_messages_directory() -> Result<PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    Ok(Path::new(&manifest_dir).join("messages"))
}
