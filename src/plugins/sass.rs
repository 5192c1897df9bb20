//! Sass / SCSS output plugin.
//!
//! # Output Format
//!
//! One file, `<filename>.scss` (or `.sass` with `indented_syntax`):
//! - `$__token-values`: token id to a map of `"default"` and each mode
//! - `$__token-typography-mixins`: the same for typography tokens, with
//!   property maps as values
//! - `token($tokenName, $modeName: default)`: mode lookup with fallback to
//!   the default value
//! - `typography($tokenName, $modeName: default)`: mixin emitting the
//!   properties of a typography token
//!
//! # Example Output
//!
//! ```scss
//! @use "sass:map";
//!
//! $__token-values: (
//!   "color.bg": (
//!     "default": #ffffff,
//!     "dark": #000000,
//!   ),
//! );
//!
//! .page {
//!   background: token("color.bg", dark);
//! }
//! ```

use crate::config::ResolvedConfig;
use crate::models::{Metadata, Token, TokenType, TokenValue};
use crate::parser::DEFAULT_MODE;
use crate::plugin::{BuildArtifact, BuildInput, Plugin, PluginFailure};
use crate::transforms::{
    quote, sass::typography_map, Emitter, SassExpr, SassTransformer, Statement, Syntax,
    TransformError, TransformFn,
};
use serde::Deserialize;
use std::path::PathBuf;

const VALUES_MAP: &str = "__token-values";
const TYPOGRAPHY_MAP: &str = "__token-typography-mixins";

/// Options of the Sass plugin.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SassOptions {
    /// Output file name without extension
    pub filename: String,
    /// Emit indented `.sass` syntax instead of `.scss`
    #[serde(alias = "indentedSyntax")]
    pub indented_syntax: bool,
    /// Inline local `link` files as base64 data URIs
    #[serde(alias = "embedFiles")]
    pub embed_files: bool,
    /// Override for token values; only settable from code
    #[serde(skip)]
    pub transform: Option<TransformFn>,
}

impl Default for SassOptions {
    fn default() -> Self {
        Self { filename: "index".to_string(), indented_syntax: false, embed_files: false, transform: None }
    }
}

impl std::fmt::Debug for SassOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SassOptions")
            .field("filename", &self.filename)
            .field("indented_syntax", &self.indented_syntax)
            .field("embed_files", &self.embed_files)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl SassOptions {
    pub fn syntax(&self) -> Syntax {
        if self.indented_syntax {
            Syntax::Indented
        } else {
            Syntax::Scss
        }
    }
}

/// Sass output plugin.
#[derive(Debug, Default)]
pub struct SassPlugin {
    options: SassOptions,
    /// Project root captured in the configure phase
    root: Option<PathBuf>,
}

impl SassPlugin {
    pub fn new(options: SassOptions) -> Self {
        Self { options, root: None }
    }

    /// Render the stylesheet text.
    pub fn render(&self, tokens: &[Token], metadata: &Metadata) -> Result<String, TransformError> {
        let mut transformer = SassTransformer::new().with_override(self.options.transform.clone());
        if self.options.embed_files {
            transformer =
                transformer.with_embed_root(self.root.clone().unwrap_or_else(|| PathBuf::from(".")));
        }

        let mut values = Vec::with_capacity(tokens.len());
        let mut typography = Vec::new();
        for token in tokens {
            let mut modes = vec![(quote(DEFAULT_MODE), transformer.transform(token, None)?)];
            for mode in token.mode_names() {
                modes.push((quote(mode), transformer.transform(token, Some(mode))?));
            }
            values.push((quote(&token.id), SassExpr::Map(modes)));

            if token.token_type == TokenType::Typography {
                typography.push((quote(&token.id), typography_modes(token)));
            }
        }

        let mut statements = vec![Statement::Comment(header(metadata)), Statement::Blank];
        statements.push(Statement::line("@use \"sass:map\""));
        statements.push(Statement::Blank);
        statements.push(Statement::Variable { name: VALUES_MAP.into(), value: SassExpr::Map(values) });
        statements.push(Statement::Blank);
        statements
            .push(Statement::Variable { name: TYPOGRAPHY_MAP.into(), value: SassExpr::Map(typography) });
        statements.push(Statement::Blank);
        statements.push(token_function());
        statements.push(Statement::Blank);
        statements.push(typography_mixin());

        Ok(Emitter::new(self.options.syntax()).emit(&statements))
    }

    fn output_filename(&self) -> String {
        format!("{}.{}", self.options.filename, self.options.syntax().extension())
    }
}

impl Plugin for SassPlugin {
    fn name(&self) -> &str {
        "sass"
    }

    fn config(&mut self, config: &ResolvedConfig) -> Result<(), PluginFailure> {
        self.root = Some(config.root.clone());
        Ok(())
    }

    fn build(&self, input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
        let text = self.render(input.tokens, input.metadata)?;
        Ok(vec![BuildArtifact::text(self.output_filename(), text)])
    }
}

fn header(metadata: &Metadata) -> String {
    match &metadata.name {
        Some(name) => format!("Generated by tokenweave from {}. Do not edit.", name),
        None => "Generated by tokenweave. Do not edit.".to_string(),
    }
}

/// Default and per-mode property maps of a typography token.
fn typography_modes(token: &Token) -> SassExpr {
    let property_map = |value: &TokenValue| match value {
        TokenValue::Typography(properties) => typography_map(properties),
        _ => SassExpr::Map(Vec::new()),
    };
    let mut modes = vec![(quote(DEFAULT_MODE), property_map(&token.value))];
    for (mode, value) in &token.modes {
        modes.push((quote(mode), property_map(value)));
    }
    SassExpr::Map(modes)
}

fn token_function() -> Statement {
    Statement::block(
        "@function token($tokenName, $modeName: default)",
        vec![
            Statement::block(
                format!("@if not map.has-key(${}, $tokenName)", VALUES_MAP),
                vec![Statement::line("@error \"Unknown token '#{$tokenName}'\"")],
            ),
            Statement::line(format!("$modes: map.get(${}, $tokenName)", VALUES_MAP)),
            Statement::block(
                "@if map.has-key($modes, $modeName)",
                vec![Statement::line("@return map.get($modes, $modeName)")],
            ),
            Statement::line(format!("@return map.get($modes, {})", quote(DEFAULT_MODE))),
        ],
    )
}

fn typography_mixin() -> Statement {
    Statement::block(
        "@mixin typography($tokenName, $modeName: default)",
        vec![
            Statement::block(
                format!("@if not map.has-key(${}, $tokenName)", TYPOGRAPHY_MAP),
                vec![Statement::line("@error \"Unknown typography token '#{$tokenName}'\"")],
            ),
            Statement::line(format!("$modes: map.get(${}, $tokenName)", TYPOGRAPHY_MAP)),
            Statement::line(format!("$properties: map.get($modes, {})", quote(DEFAULT_MODE))),
            Statement::block(
                "@if map.has-key($modes, $modeName)",
                vec![Statement::line("$properties: map.get($modes, $modeName)")],
            ),
            Statement::block(
                "@each $property, $value in $properties",
                vec![Statement::line("#{$property}: $value")],
            ),
        ],
    )
}
