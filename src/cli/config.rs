//! `dvc.json`: markup configuration plus the type catalog the directives
//! resolve against.
//!
//! ```jsonc
//! {
//!   "importedNamespaces": [{ "namespace": "MyApp.Controls" }],
//!   "requireViewModel": true,
//!   "types": [
//!     {
//!       "namespace": "MyApp.Controls",
//!       "name": "MenuBase",
//!       "base": "DotVVM.Framework.Controls.DotvvmMarkupControl",
//!       "properties": { "Title": "string" },
//!     },
//!   ],
//! }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dvc_directives::{MarkupConfiguration, ResolutionMode, resolve_type_reference};
use dvc_parser::{GrammarEntryPoint, parse};
use dvc_types::{
    ConstantValue, ControlMarkupOptions, ImportList, NamespaceImport, TypeDefinition, TypeFlags,
    TypeId, TypeRegistry,
};
use tracing::debug;

use crate::cli::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "dvc.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvcConfig {
    #[serde(flatten)]
    pub markup: MarkupConfiguration,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One user type. Type names in `base` and `properties` use binding syntax
/// (`int`, `string[]`, `System.Collections.Generic.List<int>`) and must name
/// builtins or types listed earlier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub attribute: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Public constant fields; scalar JSON values only.
    #[serde(default)]
    pub constants: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub markup_options: Option<MarkupOptionsEntry>,
}

/// `[ControlMarkupOptions]` of a control type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupOptionsEntry {
    #[serde(default)]
    pub primary_name: Option<String>,
    #[serde(default)]
    pub alternative_names: Vec<String>,
}

impl From<&MarkupOptionsEntry> for ControlMarkupOptions {
    fn from(entry: &MarkupOptionsEntry) -> Self {
        Self {
            primary_name: entry.primary_name.clone(),
            alternative_names: entry.alternative_names.clone(),
        }
    }
}

impl DvcConfig {
    /// Registry with the builtins plus every catalog entry, in order.
    pub fn build_registry(&self) -> Result<TypeRegistry> {
        let types = TypeRegistry::new();
        for entry in &self.types {
            let full_name = format!("{}.{}", entry.namespace, entry.name);
            register_entry(&types, entry).with_context(|| format!("invalid type entry '{full_name}'"))?;
        }
        debug!(types = self.types.len(), "type catalog registered");
        Ok(types)
    }
}

fn register_entry(types: &TypeRegistry, entry: &TypeEntry) -> Result<TypeId> {
    let mut definition = if entry.value_type {
        TypeDefinition::value_type(&entry.namespace, &entry.name)
    } else {
        TypeDefinition::class(&entry.namespace, &entry.name)
    };
    if let Some(base) = &entry.base {
        definition = definition.with_base(resolve_catalog_type(types, base)?);
    }
    if entry.attribute {
        definition = definition.with_flags(TypeFlags::ATTRIBUTE);
    }
    for (name, type_name) in &entry.properties {
        let property_type =
            resolve_catalog_type(types, type_name).with_context(|| format!("property '{name}'"))?;
        definition = definition.with_property(name, property_type);
    }
    if let Some(options) = &entry.markup_options {
        definition = definition.with_markup_options(options.into());
    }

    let id = types.register(definition);
    for (name, value) in &entry.constants {
        let value = constant_from_json(value).with_context(|| format!("constant '{name}'"))?;
        types.add_constant(id, name, value);
    }
    Ok(id)
}

/// Resolve a type written in binding syntax against full names only.
pub fn resolve_catalog_type(types: &TypeRegistry, text: &str) -> Result<TypeId> {
    let parsed = parse(text, GrammarEntryPoint::TypeName);
    if let Some(diagnostic) = parsed.diagnostics.first() {
        bail!("'{text}' is not a type name: {}", diagnostic.message_text);
    }
    let reference = parsed
        .root
        .as_type_reference()
        .ok_or_else(|| anyhow!("'{text}' is not a type name"))?;
    resolve_type_reference(types, reference, &ImportList::new(), ResolutionMode::Strict)
        .type_id()
        .ok_or_else(|| anyhow!("unknown type '{text}'"))
}

fn constant_from_json(value: &serde_json::Value) -> Result<ConstantValue> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => ConstantValue::Null,
        Value::Bool(value) => ConstantValue::Bool(*value),
        Value::String(value) => ConstantValue::String(value.clone()),
        Value::Number(number) => match number.as_i64() {
            Some(value) => i32::try_from(value).map_or(ConstantValue::Long(value), ConstantValue::Int),
            None => ConstantValue::Double(
                number
                    .as_f64()
                    .ok_or_else(|| anyhow!("number {number} is out of range"))?,
            ),
        },
        Value::Array(_) | Value::Object(_) => bail!("only scalar constants are supported"),
    })
}

pub fn parse_config(source: &str) -> Result<DvcConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    let config = serde_json::from_str(&normalized).context("failed to parse dvc.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<DvcConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// Config named by `--config`, else `dvc.json` in `cwd` if present, else
/// defaults; command-line options are applied on top.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<DvcConfig> {
    let path: Option<PathBuf> = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => Some(cwd.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
    };
    let mut config = match &path {
        Some(path) => load_config(path)?,
        None => DvcConfig::default(),
    };

    if args.design_time {
        config.markup.design_time = true;
    }
    for import in &args.imports {
        let Some(import) = NamespaceImport::parse(import) else {
            bail!("invalid --import value '{import}'");
        };
        config.markup.imported_namespaces.push(import);
    }
    Ok(config)
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Drop commas directly followed (modulo whitespace) by `}` or `]`.
fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}
