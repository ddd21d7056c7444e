// src/export.rs - Rendering a configuration as generator input
//
// The generator takes its configuration as a JavaScript object. `to_json`
// produces that object as data; `to_module` produces a loadable CommonJS
// module, which is the only form that can carry regex safelist entries.

use crate::color::PaletteEntry;
use crate::config::Configuration;
use crate::safelist::SafelistEntry;
use serde_json::{Map, Value, json};

pub fn to_json(config: &Configuration) -> Value {
    let safelist: Vec<Value> = config
        .safelist
        .entries()
        .iter()
        .map(|entry| match entry {
            SafelistEntry::Class(class) => json!(class),
            SafelistEntry::Pattern(regex) => json!({ "pattern": regex.as_str() }),
        })
        .collect();

    json!({
        "content": {
            "files": content_files(config),
            "safelist": safelist,
        },
        "theme": theme_json(config),
        "plugins": config.plugins,
    })
}

/// A CommonJS module: `module.exports = {...};`
pub fn to_module(config: &Configuration) -> Result<String, serde_json::Error> {
    let mut safelist = String::new();
    for entry in config.safelist.entries() {
        let line = match entry {
            SafelistEntry::Class(class) => serde_json::to_string(class)?,
            SafelistEntry::Pattern(regex) => format!(
                "{{ pattern: new RegExp({}) }}",
                serde_json::to_string(regex.as_str())?
            ),
        };
        safelist.push_str(&format!("      {line},\n"));
    }

    let plugins = config
        .plugins
        .iter()
        .map(|plugin| serde_json::to_string(plugin).map(|name| format!("require({name})")))
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    Ok(format!(
        "// Generated by leafwind. Edit the TOML source instead.\n\
         module.exports = {{\n  \
           content: {{\n    \
             files: {files},\n    \
             safelist: [\n{safelist}    ],\n  \
           }},\n  \
           theme: {theme},\n  \
           plugins: [{plugins}],\n\
         }};\n",
        files = serde_json::to_string(&content_files(config))?,
        theme = serde_json::to_string_pretty(&theme_json(config))?.replace('\n', "\n  "),
    ))
}

fn content_files(config: &Configuration) -> Vec<&str> {
    config
        .content
        .patterns()
        .iter()
        .map(|p| p.as_str())
        .collect()
}

fn theme_json(config: &Configuration) -> Value {
    let theme = &config.theme;

    let mut colors = Map::new();
    for entry in theme.colors.entries() {
        let value = match entry {
            PaletteEntry::Token(token) => json!(token.color.to_hex()),
            PaletteEntry::Group(group) => Value::Object(
                group
                    .tokens
                    .iter()
                    .map(|t| (t.name.clone(), json!(t.color.to_hex())))
                    .collect(),
            ),
        };
        colors.insert(entry.name().to_string(), value);
    }

    let font_family: Map<String, Value> = theme
        .fonts
        .iter()
        .map(|font| (font.name.clone(), json!(font.families())))
        .collect();

    let border_width: Map<String, Value> = theme
        .border_width
        .iter()
        .map(|(key, length)| (key.clone(), json!(length.to_string())))
        .collect();

    let keyframes: Map<String, Value> = theme
        .keyframes
        .iter()
        .map(|def| {
            let steps: Map<String, Value> = def
                .steps
                .iter()
                .map(|step| (step.offset.to_string(), json!(step.properties)))
                .collect();
            (def.name.clone(), Value::Object(steps))
        })
        .collect();

    let animation: Map<String, Value> = theme
        .animations
        .iter()
        .map(|binding| (binding.name.clone(), json!(binding.shorthand())))
        .collect();

    json!({
        "fontFamily": font_family,
        "colors": colors,
        "borderWidth": border_width,
        "keyframes": keyframes,
        "animation": animation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_carries_every_name() {
        let config = Configuration::load().unwrap();
        let json = to_json(&config);

        assert_eq!(json["theme"]["colors"]["winter"]["leaf2"], "#EAF6FF");
        assert_eq!(json["theme"]["colors"]["bg"], "#000D14");
        assert_eq!(json["theme"]["fontFamily"]["mono"][0], "Roboto Mono");
        assert_eq!(json["theme"]["borderWidth"]["DEFAULT"], "0.5px");
        assert_eq!(
            json["theme"]["keyframes"]["windGust"]["50%"]["transform"],
            "translateX(var(--wind-distance, 10px))"
        );
        assert_eq!(
            json["theme"]["animation"]["wind-gust"],
            "windGust var(--wind-duration, 0.75s) ease-in-out forwards"
        );
        assert_eq!(
            json["content"]["safelist"][0]["pattern"],
            "text-(winter|summer|autumn)-leaf[1-4]"
        );
        assert_eq!(json["content"]["files"][0], "./src/**/*.{html,js,svelte,ts}");
        assert_eq!(json["plugins"], json!([]));
    }

    #[test]
    fn test_keyframe_steps_keep_timeline_order() {
        let config = Configuration::load().unwrap();
        let json = to_json(&config);
        let keys: Vec<&String> = json["theme"]["keyframes"]["loadIn"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["0%", "45%", "75%", "100%"]);
    }

    #[test]
    fn test_module_uses_regexp_for_patterns() {
        let config = Configuration::load().unwrap();
        let module = to_module(&config).unwrap();

        assert!(module.contains("module.exports = {"));
        assert!(module.contains(r#"{ pattern: new RegExp("text-(winter|summer|autumn)-leaf[1-4]") }"#));
        assert!(module.contains(r#""text-brown","#));
        assert!(module.contains("plugins: [],"));
        assert!(module.trim_end().ends_with("};"));
    }
}
