//! Emission of one API stub module per tag.

use std::fmt::{self, Display};

use crate::options::GeneratorOptions;
use crate::table::PathTable;

use super::naming::{export_name, module_constant_name};
use super::operation::FunctionStub;

/// One generated module: a tag's stubs plus the names used to address it.
#[derive(Debug)]
pub struct ApiModule {
    /// The normalized module key; also the output file stem.
    pub key: String,
    /// The tag name as authored, used in the module banner.
    pub tag_name: String,
    pub stubs: Vec<FunctionStub>,
}

/// Renders a module artifact: transport and path-constants imports, one
/// exported function per operation, and a default aggregate export.
pub struct RenderApiModule<'a> {
    module: &'a ApiModule,
    table: &'a PathTable,
    options: &'a GeneratorOptions,
}

impl<'a> RenderApiModule<'a> {
    pub fn new(module: &'a ApiModule, table: &'a PathTable, options: &'a GeneratorOptions) -> Self {
        Self {
            module,
            table,
            options,
        }
    }
}

impl Display for RenderApiModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/**")?;
        writeln!(f, " * {} API module.", self.module.tag_name)?;
        writeln!(f, " *")?;
        writeln!(f, " * Generated by apigen. Do not edit by hand.")?;
        writeln!(f, " */")?;
        writeln!(f)?;
        writeln!(f, "import request from '{}';", self.options.request_module)?;
        writeln!(
            f,
            "import {{ {}, resolveFullPath }} from '{}';",
            module_constant_name(&self.module.key),
            self.options.api_paths_module
        )?;
        writeln!(f)?;

        for stub in &self.module.stubs {
            writeln!(f, "{}", stub.render(self.table, self.options))?;
        }

        writeln!(f, "export default {{")?;
        for stub in &self.module.stubs {
            writeln!(f, "  {},", export_name(&stub.name))?;
        }
        writeln!(f, "}};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::codegen::operation::generate;
    use crate::parse::Document;
    use crate::table::build;

    #[test]
    fn renders_module_with_imports_and_default_export() {
        let doc = Document::from_json(indoc! {r#"
            {
              "tags": [{"name": "users"}],
              "paths": {
                "/users/": {
                  "get": {"operationId": "listUsers", "tags": ["users"]}
                },
                "/users/{id}/": {
                  "get": {
                    "operationId": "retrieveUser",
                    "tags": ["users"],
                    "parameters": [{"name": "id", "in": "path"}]
                  }
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
        let module = ApiModule {
            key: "users".to_owned(),
            tag_name: "users".to_owned(),
            stubs: generate(&doc, &table, &doc.tags[0], &options),
        };

        assert_eq!(
            RenderApiModule::new(&module, &table, &options).to_string(),
            indoc! {"
                /**
                 * users API module.
                 *
                 * Generated by apigen. Do not edit by hand.
                 */

                import request from '@/utils/request';
                import { USERS_API, resolveFullPath } from '@/utils/api-paths';

                export function listUsers() {
                  return request({
                    url: resolveFullPath(USERS_API.LISTUSERS),
                    method: 'get',
                  });
                }

                export function retrieveUser(id) {
                  return request({
                    url: resolveFullPath(USERS_API.RETRIEVEUSER(id)),
                    method: 'get',
                  });
                }

                export default {
                  listUsers,
                  retrieveUser,
                };
            "}
        );
    }
}
