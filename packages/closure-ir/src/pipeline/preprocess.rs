//! Source preparation before parsing
//!
//! Removes the IDE-side stub markers and injects the prelude imports on the `package`
//! line, so the rewritten calls resolve without touching line numbers.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::PreludeConfig;

lazy_static! {
    static ref PACKAGE_LINE: Regex =
        Regex::new(r"(?m)^(package [^\r\n]*)").expect("package line pattern is valid");
}

/// Strip stub markers and append prelude imports to every `package` line
pub fn preprocess(content: &str, prelude: &PreludeConfig) -> String {
    let stripped = if prelude.stub_marker.is_empty() {
        content.to_string()
    } else {
        content.replace(&prelude.stub_marker, "")
    };

    if prelude.imports.is_empty() {
        return stripped;
    }

    let imports = prelude_imports(prelude);
    PACKAGE_LINE
        .replace_all(&stripped, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], imports)
        })
        .into_owned()
}

/// `;import a;import b;`
fn prelude_imports(prelude: &PreludeConfig) -> String {
    let mut out = String::from(";");
    for import in &prelude.imports {
        out.push_str("import ");
        out.push_str(import);
        out.push(';');
    }
    out
}
