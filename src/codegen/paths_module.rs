//! Emission of the path-constants module.

use std::fmt::{self, Display};

use indoc::indoc;
use itertools::Itertools;

use crate::options::GeneratorOptions;
use crate::parse::path::{PathFragment, scan};
use crate::table::{PathBuilder, PathTable, PathValue};

use super::naming::{argument_names, is_valid_identifier, module_constant_name};

/// Renders the path-constants module: one `<KEY>_API` constant group per
/// module, the `resolveFullPath`/`resolveModule` helper pair, and a default
/// aggregate export.
pub struct PathsModule<'a> {
    table: &'a PathTable,
    options: &'a GeneratorOptions,
}

impl<'a> PathsModule<'a> {
    pub fn new(table: &'a PathTable, options: &'a GeneratorOptions) -> Self {
        Self { table, options }
    }
}

impl Display for PathsModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(indoc! {"
            /**
             * API path constants.
             *
             * Generated by apigen. Do not edit by hand.
             */

            // Base path prefix applied by resolveFullPath.
            export const API_PREFIX = '/api';

            // Version segment inserted by resolveFullPath on request.
            export const API_VERSION = 'v1';

        "})?;

        for (key, group) in self.table.modules() {
            if self.options.include_comments && !group.description.is_empty() {
                writeln!(f, "// {}", group.description)?;
            }
            writeln!(f, "export const {} = {{", module_constant_name(key))?;
            for (entry_key, value) in group.entries() {
                let rendered = match value {
                    PathValue::Literal(path) => format!("'{}'", escape_single_quoted(path)),
                    PathValue::Builder(builder) => render_builder(builder),
                    // Summaries are re-attached as comments below.
                    PathValue::Description(_) => continue,
                };
                if self.options.include_comments {
                    if let Some(summary) = group.description_for(entry_key) {
                        writeln!(f, "  // {summary}")?;
                    }
                }
                writeln!(f, "  {}: {rendered},", object_key(&entry_key.to_uppercase()))?;
            }
            writeln!(f, "}};")?;
            writeln!(f)?;
        }

        f.write_str(indoc! {"
            /**
             * Resolve a path against the configured prefix and version.
             *
             * @param {string} path - A path from one of the constant groups.
             * @param {Object} [options] - Resolution options.
             * @param {boolean} [options.addPrefix] - Prepend API_PREFIX (default true).
             * @param {boolean} [options.addVersion] - Insert API_VERSION (default false).
             * @param {Object} [options.params] - Query parameters to append.
             * @returns {string} The resolved path.
             */
            export function resolveFullPath(path, options = {}) {
              const { addPrefix = true, addVersion = false, params = null } = options;

              let fullPath = path;
              if (addPrefix && !path.startsWith(API_PREFIX)) {
                fullPath = `${API_PREFIX}${path}`;
              }

              if (addVersion && !fullPath.includes(`/${API_VERSION}/`)) {
                const prefixEnd = addPrefix ? API_PREFIX.length : 0;
                fullPath = `${fullPath.substring(0, prefixEnd)}/${API_VERSION}${fullPath.substring(prefixEnd)}`;
              }

              if (params && typeof params === 'object') {
                const query = new URLSearchParams();
                Object.entries(params).forEach(([key, value]) => {
                  if (value !== undefined && value !== null) {
                    query.append(key, value);
                  }
                });
                const queryString = query.toString();
                if (queryString) {
                  fullPath = `${fullPath}${fullPath.includes('?') ? '&' : '?'}${queryString}`;
                }
              }

              return fullPath;
            }

            /**
             * Look up a module's path constants by name, case-insensitively.
             *
             * @param {string} name - The module name.
             * @returns {Object|null} The module's constant group, or null.
             */
            export function resolveModule(name) {
              const modules = {
        "})?;
        for (key, _) in self.table.modules() {
            writeln!(
                f,
                "    {}: {},",
                object_key(&key.to_lowercase()),
                module_constant_name(key)
            )?;
        }
        f.write_str(indoc! {"
              };
              return modules[name.toLowerCase()] || null;
            }

            export default {
              API_PREFIX,
              API_VERSION,
        "})?;
        for (key, _) in self.table.modules() {
            writeln!(f, "  {},", module_constant_name(key))?;
        }
        f.write_str(indoc! {"
              resolveFullPath,
              resolveModule,
            };
        "})
    }
}

/// Renders a builder entry as an arrow function over its placeholder names,
/// straight from the structured template form.
fn render_builder(builder: &PathBuilder) -> String {
    let arguments = argument_names(builder.placeholders(), &[]);
    let mut body = String::new();
    let mut index = 0;
    for fragment in scan(builder.template()) {
        match fragment {
            PathFragment::Literal(text) => body.push_str(&escape_template(text)),
            PathFragment::Param(_) => {
                // Every placeholder has an argument at its index.
                if let Some(name) = arguments.get(index) {
                    body.push_str("${");
                    body.push_str(name);
                    body.push('}');
                }
                index += 1;
            }
        }
    }
    format!("({}) => `{body}`", arguments.iter().join(", "))
}

/// An object literal key: bare when it's a valid identifier, single-quoted
/// otherwise.
fn object_key(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_owned()
    } else {
        format!("'{}'", escape_single_quoted(key))
    }
}

fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::parse::Document;
    use crate::table::build;

    #[test]
    fn renders_literal_and_builder_groups() {
        let doc = Document::from_json(indoc! {r#"
            {
              "tags": [{"name": "users", "description": "User management"}],
              "paths": {
                "/users/": {
                  "get": {"operationId": "list", "tags": ["users"], "summary": "List users"}
                },
                "/users/{id}/": {
                  "get": {
                    "operationId": "detail",
                    "tags": ["users"],
                    "parameters": [{"name": "id", "in": "path"}]
                  }
                }
              }
            }
        "#})
        .unwrap();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        let rendered = PathsModule::new(&table, &options).to_string();

        let expected_group = indoc! {"
            // User management
            export const USERS_API = {
              // List users
              LIST: '/users/',
              DETAIL: (id) => `/users/${id}/`,
            };
        "};
        assert!(
            rendered.contains(expected_group),
            "missing constant group in:\n{rendered}"
        );
        assert!(rendered.contains("export const API_PREFIX = '/api';"));
        assert!(rendered.contains("export function resolveFullPath(path, options = {})"));
        assert!(rendered.contains("    users: USERS_API,"));
        assert!(rendered.contains("  USERS_API,"));
    }

    #[test]
    fn skips_comments_when_disabled() {
        let doc = Document::from_json(indoc! {r#"
            {
              "tags": [{"name": "users", "description": "User management"}],
              "paths": {
                "/users/": {
                  "get": {"operationId": "list", "tags": ["users"], "summary": "List users"}
                }
              }
            }
        "#})
        .unwrap();
        let options = GeneratorOptions {
            include_comments: false,
            ..GeneratorOptions::default()
        };
        let table = build(&doc, &doc.tags, &options);
        let rendered = PathsModule::new(&table, &options).to_string();

        assert!(!rendered.contains("// User management"));
        assert!(!rendered.contains("// List users"));
        assert!(rendered.contains("LIST: '/users/',"));
    }

    #[test]
    fn builder_with_multiple_and_duplicate_placeholders() {
        let builder = PathBuilder::new("/testplans/{id}/case/{id}/");
        assert_eq!(
            render_builder(&builder),
            "(id, id2) => `/testplans/${id}/case/${id2}/`"
        );
    }

    #[test]
    fn builder_sanitizes_placeholder_names() {
        let builder = PathBuilder::new("/items/{item-id}/");
        assert_eq!(render_builder(&builder), "(itemId) => `/items/${itemId}/`");
    }

    #[test]
    fn template_literal_escaping() {
        assert_eq!(escape_template(r"/plain/path"), r"/plain/path");
        assert_eq!(escape_template("/a${b}"), r"/a\${b}");
        assert_eq!(escape_template("tick`"), r"tick\`");
        assert_eq!(escape_template(r"back\slash"), r"back\\slash");
    }
}
