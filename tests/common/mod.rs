// Common test utilities for building theme documents

/// `[[theme.keyframes.windGust]]` steps at the given offsets, in order
#[allow(dead_code)]
pub fn wind_gust_keyframes(offsets: &[&str]) -> String {
    offsets
        .iter()
        .map(|at| {
            format!(
                "[[theme.keyframes.windGust]]\nat = \"{at}\"\ntransform = \"translateX(0)\"\n\n"
            )
        })
        .collect()
}

/// A document with the given keyframe tables and `[theme.animation]` entries
#[allow(dead_code)]
pub fn document(keyframes: &str, animations: &str) -> String {
    format!(
        "[content]\nfiles = [\"./src/**/*.{{html,js,svelte,ts}}\"]\n\n{keyframes}[theme.animation]\n{animations}\n"
    )
}
