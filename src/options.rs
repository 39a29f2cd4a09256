use oxc_span::SourceType;
use oxc_transformer::ESTarget;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Options accepted by [`CallableExtractor`](crate::CallableExtractor).
///
/// Every field falls back to its default when omitted, so a partial JSON
/// document such as `{"compiler_options": {"target": "es2017"}}` only
/// overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorOptions {
    pub parser_options: ParserOptions,
    pub compiler_options: CompilerOptions,
}

impl ExtractorOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Module,
    Script,
    Unambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxPlugin {
    Jsx,
    Typescript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub source_type: SourceKind,
    /// Keep going past recoverable syntax errors instead of failing on the first diagnostic.
    pub error_recovery: bool,
    pub plugins: Vec<SyntaxPlugin>,
    pub allow_return_outside_function: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            source_type: SourceKind::Module,
            error_recovery: true,
            plugins: vec![SyntaxPlugin::Jsx, SyntaxPlugin::Typescript],
            allow_return_outside_function: false,
        }
    }
}

impl ParserOptions {
    pub fn has_plugin(&self, plugin: SyntaxPlugin) -> bool {
        self.plugins.contains(&plugin)
    }

    /// Source type handed to the oxc parser.
    pub fn source_type(&self) -> SourceType {
        let source_type = SourceType::default()
            .with_typescript(self.has_plugin(SyntaxPlugin::Typescript))
            .with_jsx(self.has_plugin(SyntaxPlugin::Jsx));
        match self.source_type {
            SourceKind::Module => source_type.with_module(true),
            SourceKind::Script => source_type.with_script(true),
            SourceKind::Unambiguous => source_type.with_unambiguous(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Syntax level isolated code is lowered to, e.g. `es2017` or `esnext`.
    pub target: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target: ESTarget::ES2020.to_string(),
        }
    }
}

impl CompilerOptions {
    pub fn es_target(&self) -> Result<ESTarget> {
        self.target.parse().map_err(ExtractError::InvalidTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractorOptions::default();
        assert_eq!(options.parser_options.source_type, SourceKind::Module);
        assert!(options.parser_options.error_recovery);
        assert!(options.parser_options.has_plugin(SyntaxPlugin::Typescript));
        assert!(options.parser_options.has_plugin(SyntaxPlugin::Jsx));
        assert_eq!(options.compiler_options.es_target().unwrap(), ESTarget::ES2020);
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let options =
            ExtractorOptions::from_json(r#"{"compiler_options": {"target": "es2017"}}"#).unwrap();
        assert_eq!(options.compiler_options.es_target().unwrap(), ESTarget::ES2017);
        assert_eq!(options.parser_options, ParserOptions::default());
    }

    #[test]
    fn test_source_type_from_plugins() {
        let options = ParserOptions {
            source_type: SourceKind::Script,
            plugins: vec![],
            ..ParserOptions::default()
        };
        let source_type = options.source_type();
        assert!(source_type.is_javascript());
        assert!(source_type.is_script());
        assert!(!source_type.is_jsx());

        let source_type = ParserOptions::default().source_type();
        assert!(source_type.is_typescript());
        assert!(source_type.is_module());
        assert!(source_type.is_jsx());
    }

    #[test]
    fn test_invalid_target() {
        let options = CompilerOptions {
            target: "es1999".to_string(),
        };
        assert!(matches!(
            options.es_target(),
            Err(ExtractError::InvalidTarget(_))
        ));
    }
}
