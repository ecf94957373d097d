//! The path table: per-module groups of path constants and path builders,
//! derived from a loaded document.

use indexmap::IndexMap;

use crate::codegen::format_key;
use crate::options::GeneratorOptions;
use crate::parse::path::{PathFragment, scan};
use crate::parse::{Document, Method, Operation, Tag};

/// The key of the single synthetic module used when tag grouping is off.
pub const FLAT_MODULE: &str = "api";

/// Path entries for every generated module, keyed by normalized tag name.
#[derive(Debug, Default)]
pub struct PathTable {
    modules: IndexMap<String, PathGroup>,
}

impl PathTable {
    pub fn modules(&self) -> impl Iterator<Item = (&str, &PathGroup)> {
        self.modules.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn module(&self, key: &str) -> Option<&PathGroup> {
        self.modules.get(key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// One module's path entries, in document order.
///
/// Operation summaries are co-located with the path entries under
/// `<key>_description`, mirroring the layout of the generated constant
/// object. Keys are not checked for uniqueness: a later operation with a
/// colliding key silently overwrites the earlier one.
#[derive(Debug, Default)]
pub struct PathGroup {
    /// The owning tag's description, or empty.
    pub description: String,
    entries: IndexMap<String, PathValue>,
}

impl PathGroup {
    fn with_description(description: Option<&str>) -> Self {
        Self {
            description: description.unwrap_or_default().to_owned(),
            entries: IndexMap::new(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn entry(&self, key: &str) -> Option<&PathValue> {
        self.entries.get(key)
    }

    /// Looks up the co-located summary for an entry, if one was stored.
    pub fn description_for(&self, key: &str) -> Option<&str> {
        match self.entries.get(&format!("{key}_description")) {
            Some(PathValue::Description(text)) => Some(text),
            _ => None,
        }
    }
}

/// A value within a module's path group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathValue {
    /// A fixed path, emitted as a quoted string constant.
    Literal(String),
    /// A parameterized path, emitted as an arrow function.
    Builder(PathBuilder),
    /// An auxiliary operation summary stored under `<key>_description`.
    Description(String),
}

/// A parameterized path template with its ordered placeholder names.
///
/// Placeholders are matched to fill arguments by position, not by name; the
/// declaration order of an operation's path parameters is assumed to match
/// the template's left-to-right placeholder order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathBuilder {
    template: String,
    placeholders: Vec<String>,
}

impl PathBuilder {
    pub fn new(template: &str) -> Self {
        let placeholders = scan(template)
            .into_iter()
            .filter_map(|fragment| match fragment {
                PathFragment::Param(name) => Some(name.to_owned()),
                PathFragment::Literal(_) => None,
            })
            .collect();
        Self {
            template: template.to_owned(),
            placeholders,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in template order, duplicates preserved.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Substitutes each placeholder with the positional argument at its
    /// index. Placeholders past the end of `args` stay unsubstituted; extra
    /// arguments are ignored.
    pub fn fill<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut index = 0;
        for fragment in scan(&self.template) {
            match fragment {
                PathFragment::Literal(text) => out.push_str(text),
                PathFragment::Param(name) => {
                    match args.get(index) {
                        Some(arg) => out.push_str(arg.as_ref()),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    index += 1;
                }
            }
        }
        out
    }
}

/// The id an operation is keyed by: its `operationId`, or a name derived
/// from the method and path when absent.
pub fn effective_operation_id(operation: &Operation, method: Method, template: &str) -> String {
    match &operation.operation_id {
        Some(id) => id.clone(),
        None => format!("{}{}", method.as_str(), format_key(template, true)),
    }
}

/// Builds the path table for the given tags.
///
/// Every tag gets a module entry, even when no operation matches it. An
/// operation is included only when its first tag exactly matches one of the
/// given tag names. With `group_by_tag` off, `tags` is ignored and every
/// operation lands in a single flat module.
pub fn build(document: &Document, tags: &[Tag], options: &GeneratorOptions) -> PathTable {
    let mut table = PathTable::default();

    if options.group_by_tag {
        for tag in tags {
            let key = format_key(&tag.name, options.camel_case_keys);
            table
                .modules
                .insert(key, PathGroup::with_description(tag.description.as_deref()));
        }

        for (template, item) in &document.paths {
            for (method, operation) in item.operations() {
                let Some(primary) = operation.primary_tag() else {
                    continue;
                };
                if !tags.iter().any(|tag| tag.name == primary) {
                    continue;
                }
                let module_key = format_key(primary, options.camel_case_keys);
                let group = table.modules.entry(module_key).or_default();
                insert_operation(group, operation, method, template, options);
            }
        }
    } else {
        let key = format_key(FLAT_MODULE, options.camel_case_keys);
        let group = table.modules.entry(key).or_default();
        for (template, item) in &document.paths {
            for (method, operation) in item.operations() {
                insert_operation(group, operation, method, template, options);
            }
        }
    }

    table
}

fn insert_operation(
    group: &mut PathGroup,
    operation: &Operation,
    method: Method,
    template: &str,
    options: &GeneratorOptions,
) {
    let id = effective_operation_id(operation, method, template);
    let key = format_key(&id, options.camel_case_keys);

    let value = if template.contains('{') {
        PathValue::Builder(PathBuilder::new(template))
    } else {
        PathValue::Literal(template.to_owned())
    };
    group.entries.insert(key.clone(), value);

    if options.include_comments {
        if let Some(summary) = &operation.summary {
            group
                .entries
                .insert(format!("{key}_description"), PathValue::Description(summary.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn sample_document() -> Document {
        Document::from_json(indoc! {r#"
            {
              "tags": [
                {"name": "users", "description": "User management"},
                {"name": "projects"}
              ],
              "paths": {
                "/users/": {
                  "get": {"operationId": "listUsers", "tags": ["users"], "summary": "List users"}
                },
                "/users/{id}/": {
                  "get": {
                    "operationId": "retrieveUser",
                    "tags": ["users"],
                    "parameters": [{"name": "id", "in": "path"}]
                  }
                },
                "/internal/": {
                  "get": {"operationId": "noTags"}
                }
              }
            }
        "#})
        .unwrap()
    }

    #[test]
    fn builds_one_module_per_tag_even_when_empty() {
        let doc = sample_document();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);

        assert_eq!(table.len(), 2);
        let projects = table.module("projects").unwrap();
        assert_eq!(projects.entries().count(), 0);
        assert_eq!(table.module("users").unwrap().description, "User management");
    }

    #[test]
    fn literal_and_builder_entries() {
        let doc = sample_document();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        let users = table.module("users").unwrap();

        assert_eq!(
            users.entry("listUsers"),
            Some(&PathValue::Literal("/users/".to_owned()))
        );
        match users.entry("retrieveUser") {
            Some(PathValue::Builder(builder)) => {
                assert_eq!(builder.placeholders(), ["id"]);
                assert_eq!(builder.template(), "/users/{id}/");
            }
            other => panic!("expected a builder, got {other:?}"),
        }
    }

    #[test]
    fn untagged_operations_are_excluded() {
        let doc = sample_document();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        for (_, group) in table.modules() {
            assert!(group.entry("noTags").is_none());
        }
    }

    #[test]
    fn summaries_are_co_located_with_entries() {
        let doc = sample_document();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        let users = table.module("users").unwrap();

        assert_eq!(users.description_for("listUsers"), Some("List users"));
        assert_eq!(
            users.entry("listUsers_description"),
            Some(&PathValue::Description("List users".to_owned()))
        );
        assert_eq!(users.description_for("retrieveUser"), None);
    }

    #[test]
    fn summaries_are_dropped_without_comments() {
        let doc = sample_document();
        let options = GeneratorOptions {
            include_comments: false,
            ..GeneratorOptions::default()
        };
        let table = build(&doc, &doc.tags, &options);
        let users = table.module("users").unwrap();
        assert_eq!(users.description_for("listUsers"), None);
    }

    #[test]
    fn derived_operation_id_when_absent() {
        let doc = Document::from_json(indoc! {r#"
            {
              "tags": [{"name": "users"}],
              "paths": {
                "/users/{id}/": {"delete": {"tags": ["users"]}}
              }
            }
        "#})
        .unwrap();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        let users = table.module("users").unwrap();
        // "delete" + formatKey("/users/{id}/") = "delete" + "usersid".
        assert!(users.entry("deleteusersid").is_some());
    }

    #[test]
    fn colliding_keys_are_last_write_wins() {
        let doc = Document::from_json(indoc! {r#"
            {
              "tags": [{"name": "users"}],
              "paths": {
                "/users/": {"get": {"operationId": "list", "tags": ["users"]}},
                "/users/all/": {"get": {"operationId": "list", "tags": ["users"]}}
              }
            }
        "#})
        .unwrap();
        let options = GeneratorOptions::default();
        let table = build(&doc, &doc.tags, &options);
        let users = table.module("users").unwrap();

        assert_eq!(users.entries().count(), 1);
        assert_eq!(
            users.entry("list"),
            Some(&PathValue::Literal("/users/all/".to_owned()))
        );
    }

    #[test]
    fn flat_mode_collects_everything_into_one_module() {
        let doc = sample_document();
        let options = GeneratorOptions {
            group_by_tag: false,
            ..GeneratorOptions::default()
        };
        let table = build(&doc, &[], &options);

        assert_eq!(table.len(), 1);
        let api = table.module(FLAT_MODULE).unwrap();
        assert!(api.entry("listUsers").is_some());
        assert!(api.entry("retrieveUser").is_some());
        assert!(api.entry("noTags").is_some());
    }

    #[test]
    fn fill_substitutes_positionally() {
        let builder = PathBuilder::new("/users/{id}/posts/{postId}/");
        assert_eq!(builder.fill(&["42", "7"]), "/users/42/posts/7/");
    }

    #[test]
    fn fill_with_all_arguments_leaves_no_braces() {
        let builder = PathBuilder::new("/a/{x}/b/{y}/c/{z}");
        let filled = builder.fill(&["1", "2", "3"]);
        assert!(!filled.contains('{'));
        assert_eq!(filled, "/a/1/b/2/c/3");
    }

    #[test]
    fn partial_fill_leaves_remaining_placeholders() {
        let builder = PathBuilder::new("/users/{id}/posts/{postId}/");
        assert_eq!(builder.fill(&["42"]), "/users/42/posts/{postId}/");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let builder = PathBuilder::new("/users/{id}/");
        assert_eq!(builder.fill(&["42", "unused"]), "/users/42/");
    }

    #[test]
    fn duplicate_placeholders_fill_in_order() {
        let builder = PathBuilder::new("/{id}/copy/{id}/");
        assert_eq!(builder.placeholders(), ["id", "id"]);
        assert_eq!(builder.fill(&["1", "2"]), "/1/copy/2/");
    }

    #[test]
    fn zero_placeholder_template_round_trips() {
        let builder = PathBuilder::new("/users/");
        assert_eq!(builder.placeholders().len(), 0);
        assert_eq!(builder.fill::<&str>(&[]), "/users/");
    }
}
