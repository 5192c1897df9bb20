//! Sass plugin integration tests
//!
//! Renders the shared fixture and small inline documents through the Sass
//! plugin and checks the emitted stylesheet text.

use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use tokenweave::build::BuildPipeline;
use tokenweave::config::{PluginSpec, ResolvedConfig, TokenweaveConfig};
use tokenweave::document::{load_documents, resolve_document};
use tokenweave::models::{ResolvedTokens, TokenType};
use tokenweave::plugins::{SassOptions, SassPlugin};
use tokenweave::transforms::TransformFn;

fn fixture_tokens() -> ResolvedTokens {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tokens.json");
    resolve_document(&load_documents(&[path]).unwrap()).unwrap()
}

fn render(options: SassOptions, tokens: &ResolvedTokens) -> String {
    SassPlugin::new(options).render(&tokens.tokens, &tokens.metadata).unwrap()
}

#[test]
fn test_output_is_deterministic() {
    let tokens = fixture_tokens();
    let first = render(SassOptions::default(), &tokens);
    for _ in 0..5 {
        assert_eq!(render(SassOptions::default(), &fixture_tokens()), first);
    }
}

#[test]
fn test_values_map_for_fixture() {
    let out = render(SassOptions::default(), &fixture_tokens());

    assert!(out.contains("  \"color.surface\": (\n    \"default\": #ffffff,\n    \"dark\": #000000,\n  ),\n"));
    assert!(out.contains("  \"space.sm\": (\n    \"default\": 4px,\n  ),\n"));
    assert!(out.contains("  \"motion.ease\": (\n    \"default\": cubic-bezier(0.4, 0, 0.2, 1),\n  ),\n"));
    assert!(out.contains("    \"default\": 120ms cubic-bezier(0.4, 0, 0.2, 1) 0ms,\n"));
    assert!(out.contains("    \"default\": (\"Inter\", sans-serif),\n"));
    assert!(out.contains("    \"default\": 0 2px 4px 0 #00000033,\n"));

    // Tokens appear in flattened order
    let white = out.find("\"color.palette.white\"").unwrap();
    let surface = out.find("\"color.surface\"").unwrap();
    let heading = out.find("\"text-style.heading\"").unwrap();
    assert!(white < surface && surface < heading);
}

#[test]
fn test_typography_mixins_sorted_with_modes() {
    let out = render(SassOptions::default(), &fixture_tokens());
    let expected = "\
$__token-typography-mixins: (
  \"text-style.heading\": (
    \"default\": (
      font-family: (\"Inter\", sans-serif),
      font-size: 8px,
      font-weight: 700,
      line-height: 1.2,
    ),
    \"compact\": (
      font-family: (\"Inter\", sans-serif),
      font-size: 6px,
    ),
  ),
);
";
    assert!(out.contains(expected), "{out}");
}

#[test]
fn test_mode_order_follows_source() {
    let tokens = resolve_document(&json!({
        "$type": "color",
        "bg": {
            "$value": "#ffffff",
            "$extensions": { "mode": { "zebra": "#000001", "alpha": "#000002", "mid": "#000003" } }
        }
    }))
    .unwrap();
    let out = render(SassOptions::default(), &tokens);
    let positions: Vec<usize> =
        ["\"default\"", "\"zebra\"", "\"alpha\"", "\"mid\""].iter().map(|m| out.find(m).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{out}");
}

#[test]
fn test_override_with_fallback() {
    let tokens = fixture_tokens();
    // Colors become CSS custom properties; everything else falls through
    let custom: TransformFn = Arc::new(|token, mode| {
        if token.token_type != TokenType::Color {
            return Some(String::new());
        }
        let suffix = mode.map(|m| format!("-{m}")).unwrap_or_default();
        Some(format!("var(--{}{})", token.id.replace('.', "-"), suffix))
    });
    let options = SassOptions { transform: Some(custom), ..SassOptions::default() };
    let out = render(options, &tokens);

    assert!(out.contains("    \"default\": var(--color-surface),\n    \"dark\": var(--color-surface-dark),\n"));
    assert!(out.contains("  \"space.sm\": (\n    \"default\": 4px,\n  ),\n"));
}

#[test]
fn test_indented_syntax_output() {
    let tokens = resolve_document(&json!({
        "$name": "Mini",
        "space": { "$type": "dimension", "sm": { "$value": 4 }, "md": { "$value": 8 } }
    }))
    .unwrap();
    let options = SassOptions { indented_syntax: true, ..SassOptions::default() };
    let out = render(options, &tokens);

    let expected = "\
// Generated by tokenweave from Mini. Do not edit.

@use \"sass:map\"

$__token-values: (\"space.sm\": (\"default\": 4px), \"space.md\": (\"default\": 8px))

$__token-typography-mixins: ()

@function token($tokenName, $modeName: default)
  @if not map.has-key($__token-values, $tokenName)
    @error \"Unknown token '#{$tokenName}'\"
  $modes: map.get($__token-values, $tokenName)
  @if map.has-key($modes, $modeName)
    @return map.get($modes, $modeName)
  @return map.get($modes, \"default\")

@mixin typography($tokenName, $modeName: default)
  @if not map.has-key($__token-typography-mixins, $tokenName)
    @error \"Unknown typography token '#{$tokenName}'\"
  $modes: map.get($__token-typography-mixins, $tokenName)
  $properties: map.get($modes, \"default\")
  @if map.has-key($modes, $modeName)
    $properties: map.get($modes, $modeName)
  @each $property, $value in $properties
    #{$property}: $value
";
    assert_eq!(out, expected);
}

#[test]
fn test_embed_files_through_pipeline() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("assets")).unwrap();
    fs::write(temp.path().join("assets/dot.svg"), "<svg/>").unwrap();
    fs::write(
        temp.path().join("tokens.json"),
        r#"{ "icon": { "$type": "link", "dot": { "$value": "assets/dot.svg" } } }"#,
    )
    .unwrap();

    let config = TokenweaveConfig {
        plugins: vec![PluginSpec::new("sass").with_option("embed_files", true)],
        ..TokenweaveConfig::default()
    };
    let config = ResolvedConfig::resolve(config, temp.path()).unwrap();
    let output = BuildPipeline::from_config(config).unwrap().run().unwrap();

    let scss = output.get("index.scss").and_then(|c| c.as_text()).unwrap();
    assert!(scss.contains("\"default\": url(\"data:image/svg+xml;base64,PHN2Zy8+\"),"), "{scss}");
}

#[test]
fn test_embed_missing_file_fails_build() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tokens.json"),
        r#"{ "icon": { "$type": "link", "dot": { "$value": "assets/missing.svg" } } }"#,
    )
    .unwrap();

    let config = TokenweaveConfig {
        plugins: vec![PluginSpec::new("sass").with_option("embedFiles", true)],
        ..TokenweaveConfig::default()
    };
    let config = ResolvedConfig::resolve(config, temp.path()).unwrap();
    let err = BuildPipeline::from_config(config).unwrap().run().unwrap_err();

    let message = err.to_string();
    assert!(message.contains("plugin 'sass' failed during build"), "{message}");
    assert!(message.contains("icon.dot"), "{message}");
}

#[test]
fn test_links_without_embedding_stay_paths() {
    let tokens = resolve_document(&json!({
        "icon": { "$type": "link", "dot": { "$value": "assets/dot.svg" } }
    }))
    .unwrap();
    let out = render(SassOptions::default(), &tokens);
    assert!(out.contains("\"default\": \"assets/dot.svg\","));
}
