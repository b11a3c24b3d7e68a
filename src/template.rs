//! Template interpolation for task settings
//!
//! Handles `{{ variable }}` interpolation in settings files so credentials
//! can come from the environment: `{{ env.SHOPIFY_ACCESS_TOKEN }}`.
//! Extra values passed on the command line live under `vars`.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Context for template interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Environment variables
    pub env: Value,
    /// Additional context variables
    pub vars: Value,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding the current process environment
    pub fn from_process_env() -> Self {
        let env: serde_json::Map<String, Value> = std::env::vars()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Self {
            env: Value::Object(env),
            vars: Value::Null,
        }
    }

    /// Replace environment values
    #[must_use]
    pub fn with_env(mut self, env: Value) -> Self {
        self.env = env;
        self
    }

    /// Replace additional variables
    #[must_use]
    pub fn with_vars(mut self, vars: Value) -> Self {
        self.vars = vars;
        self
    }

    /// Set a single variable
    pub fn set_var(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        if !self.vars.is_object() {
            self.vars = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut self.vars {
            map.insert(name.into(), value);
        }
        self
    }

    /// Get a value by path (e.g., "env.SHOPIFY_STORE")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();

        let root = match parts[0] {
            "env" => &self.env,
            "vars" => &self.vars,
            // Bare names resolve against vars
            _ => return get_nested_value(&self.vars, &parts),
        };

        if parts.len() == 1 {
            Some(root)
        } else {
            get_nested_value(root, &parts[1..])
        }
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a template string with the given context
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut result = template.to_string();
    let mut errors = Vec::new();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = &cap[0];
        let var_path = &cap[1];

        match ctx.get(var_path) {
            Some(value) => {
                result = result.replace(full_match, &value_to_string(value));
            }
            None => errors.push(var_path.to_string()),
        }
    }

    if errors.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_var(errors.join(", ")))
    }
}

/// Check if a string contains template variables
pub fn has_templates(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Render all string values in a JSON value
pub fn render_value(value: &Value, ctx: &TemplateContext) -> Result<Value> {
    match value {
        Value::String(s) if has_templates(s) => Ok(Value::String(render(s, ctx)?)),
        Value::Object(map) => {
            let mut new_map = serde_json::Map::new();
            for (k, v) in map {
                new_map.insert(k.clone(), render_value(v, ctx)?);
            }
            Ok(Value::Object(new_map))
        }
        Value::Array(arr) => {
            let new_arr: Result<Vec<Value>> = arr.iter().map(|v| render_value(v, ctx)).collect();
            Ok(Value::Array(new_arr?))
        }
        _ => Ok(value.clone()),
    }
}

/// Return a required setting, rejecting absent or blank values
pub fn resolve_required(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::missing_field(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_env_substitution() {
        let ctx = TemplateContext::new().with_env(json!({"SHOPIFY_TOKEN": "shpat_abc"}));

        let result = render("token={{ env.SHOPIFY_TOKEN }}", &ctx).unwrap();
        assert_eq!(result, "token=shpat_abc");
    }

    #[test]
    fn test_vars_and_bare_names() {
        let mut ctx = TemplateContext::new();
        ctx.set_var("store", json!("acme"));

        assert_eq!(
            render("{{ vars.store }}.myshopify.com", &ctx).unwrap(),
            "acme.myshopify.com"
        );
        assert_eq!(render("{{store}}", &ctx).unwrap(), "acme");
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = TemplateContext::new();
        let result = render("{{ env.MISSING }} {{ vars.other }}", &ctx);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("env.MISSING"));
        assert!(message.contains("vars.other"));
    }

    #[test]
    fn test_number_substitution() {
        let ctx = TemplateContext::new().with_vars(json!({"delay": 250, "on": true}));
        assert_eq!(
            render("{{ vars.delay }}/{{ vars.on }}", &ctx).unwrap(),
            "250/true"
        );
    }

    #[test]
    fn test_has_templates() {
        assert!(has_templates("{{ env.KEY }}"));
        assert!(has_templates("prefix {{ var }} suffix"));
        assert!(!has_templates("no templates here"));
        assert!(!has_templates("{ not a template }"));
    }

    #[test]
    fn test_render_value_nested() {
        let ctx = TemplateContext::new().with_env(json!({"DOMAIN": "shop.myshopify.com"}));
        let input = json!({
            "store_domain": "{{ env.DOMAIN }}",
            "nested": ["{{ env.DOMAIN }}", 5],
            "timeout_seconds": 10
        });

        let result = render_value(&input, &ctx).unwrap();
        assert_eq!(
            result,
            json!({
                "store_domain": "shop.myshopify.com",
                "nested": ["shop.myshopify.com", 5],
                "timeout_seconds": 10
            })
        );
    }

    #[test]
    fn test_from_process_env() {
        let ctx = TemplateContext::from_process_env();
        assert!(ctx.env.is_object());
    }

    #[test]
    fn test_resolve_required() {
        assert_eq!(
            resolve_required("store_domain", Some(" shop.myshopify.com ")).unwrap(),
            "shop.myshopify.com"
        );
        assert!(resolve_required("store_domain", Some("   ")).is_err());
        let err = resolve_required("access_token", None).unwrap_err();
        assert!(err.is_configuration());
    }
}
