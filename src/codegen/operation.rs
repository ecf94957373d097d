//! Per-operation client stub generation.

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::options::GeneratorOptions;
use crate::parse::{
    Document, Method, Operation, Parameter, ParameterLocation, ParameterSchema, SchemaType, Tag,
};
use crate::table::{FLAT_MODULE, PathTable, PathValue, effective_operation_id};

use super::naming::{argument_names, export_name, format_key, member_access, module_constant_name};

/// Identifiers a stub's path arguments must not shadow: the aggregate query
/// and body arguments, plus the module's imports.
const RESERVED_ARGUMENTS: &[&str] = &["params", "data", "request", "resolveFullPath"];

/// One generated client stub, derived from a single operation.
///
/// Stubs are created here and only read afterwards; the module emitter
/// serializes them without mutating.
#[derive(Clone, Debug)]
pub struct FunctionStub {
    /// The generated-code key this stub is exported under.
    pub name: String,
    pub module_key: String,
    pub operation_key: String,
    pub method: Method,
    /// Path arguments in declaration order.
    pub path_params: Vec<StubPathParam>,
    /// Whether the stub takes an aggregate `params` query argument.
    pub has_query: bool,
    /// Whether the stub takes a `data` body argument.
    pub has_body: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// A path parameter as it appears in a stub's signature.
#[derive(Clone, Debug)]
pub struct StubPathParam {
    /// The sanitized argument name.
    pub argument: String,
    /// The JSDoc type for the parameter's schema.
    pub js_type: &'static str,
    pub description: Option<String>,
}

/// Generates the stubs for every operation whose first tag is `tag`.
pub fn generate(
    document: &Document,
    table: &PathTable,
    tag: &Tag,
    options: &GeneratorOptions,
) -> Vec<FunctionStub> {
    let module_key = format_key(&tag.name, options.camel_case_keys);
    let mut stubs = Vec::new();
    for (template, item) in &document.paths {
        for (method, operation) in item.operations() {
            if operation.primary_tag() != Some(tag.name.as_str()) {
                continue;
            }
            stubs.push(build_stub(operation, method, template, &module_key, options));
        }
    }
    debug_assert!(stubs.iter().all(|s| table.module(&s.module_key).is_some()));
    stubs
}

/// Generates stubs for every operation in the document, tagged or not,
/// keyed under the single flat module.
pub fn generate_ungrouped(
    document: &Document,
    table: &PathTable,
    options: &GeneratorOptions,
) -> Vec<FunctionStub> {
    let module_key = format_key(FLAT_MODULE, options.camel_case_keys);
    let mut stubs = Vec::new();
    for (template, item) in &document.paths {
        for (method, operation) in item.operations() {
            stubs.push(build_stub(operation, method, template, &module_key, options));
        }
    }
    debug_assert!(table.module(&module_key).is_some() || stubs.is_empty());
    stubs
}

fn build_stub(
    operation: &Operation,
    method: Method,
    template: &str,
    module_key: &str,
    options: &GeneratorOptions,
) -> FunctionStub {
    let id = effective_operation_id(operation, method, template);
    let operation_key = format_key(&id, options.camel_case_keys);

    let path_params: Vec<&Parameter> = operation
        .parameters
        .iter()
        .filter(|p| p.location == Some(ParameterLocation::Path))
        .collect();
    let has_query = operation
        .parameters
        .iter()
        .any(|p| p.location == Some(ParameterLocation::Query));

    let arguments = argument_names(
        path_params.iter().map(|p| p.name.as_str()),
        RESERVED_ARGUMENTS,
    );
    let path_params = path_params
        .iter()
        .zip(arguments)
        .map(|(param, argument)| StubPathParam {
            argument,
            js_type: js_doc_type(param.schema.as_ref()),
            description: param.description.clone(),
        })
        .collect();

    FunctionStub {
        name: operation_key.clone(),
        module_key: module_key.to_owned(),
        operation_key,
        method,
        path_params,
        has_query,
        has_body: operation.has_request_body(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
    }
}

/// Maps a parameter schema to the JSDoc type name used in generated
/// comments.
fn js_doc_type(schema: Option<&ParameterSchema>) -> &'static str {
    let Some(schema) = schema else { return "any" };
    match schema.ty {
        Some(SchemaType::Integer | SchemaType::Number) => "Number",
        Some(SchemaType::String) => match schema.format.as_deref() {
            Some("date" | "date-time") => "Date",
            _ => "String",
        },
        Some(SchemaType::Boolean) => "Boolean",
        Some(SchemaType::Array) => "Array",
        Some(SchemaType::Object) => "Object",
        _ => "any",
    }
}

impl FunctionStub {
    /// Returns a renderer for this stub's JavaScript source text.
    pub fn render<'a>(
        &'a self,
        table: &'a PathTable,
        options: &'a GeneratorOptions,
    ) -> RenderStub<'a> {
        RenderStub {
            stub: self,
            table,
            options,
        }
    }

    fn arguments(&self) -> Vec<&str> {
        let mut args: Vec<&str> = self.path_params.iter().map(|p| p.argument.as_str()).collect();
        if self.has_query {
            args.push("params");
        }
        if self.has_body {
            args.push("data");
        }
        args
    }

    /// The expression resolving this stub's URL: the path constant, invoked
    /// with the path arguments when the entry is a builder.
    fn url_expression(&self, table: &PathTable) -> String {
        let constant = module_constant_name(&self.module_key);
        let member = member_access(&constant, &self.operation_key.to_uppercase());
        let entry = table
            .module(&self.module_key)
            .and_then(|group| group.entry(&self.operation_key));
        match entry {
            Some(PathValue::Builder(_)) => {
                let args = self.path_params.iter().map(|p| p.argument.as_str()).join(", ");
                format!("resolveFullPath({member}({args}))")
            }
            _ => format!("resolveFullPath({member})"),
        }
    }
}

/// Renders one exported stub function.
pub struct RenderStub<'a> {
    stub: &'a FunctionStub,
    table: &'a PathTable,
    options: &'a GeneratorOptions,
}

impl Display for RenderStub<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stub = self.stub;

        if self.options.include_comments {
            writeln!(f, "/**")?;
            if let Some(summary) = &stub.summary {
                writeln!(f, " * {summary}")?;
            }
            if let Some(description) = &stub.description {
                writeln!(f, " * {description}")?;
            }
            for param in &stub.path_params {
                match &param.description {
                    Some(text) => {
                        writeln!(f, " * @param {{{}}} {} - {text}", param.js_type, param.argument)?;
                    }
                    None => writeln!(f, " * @param {{{}}} {}", param.js_type, param.argument)?,
                }
            }
            if stub.has_query {
                writeln!(f, " * @param {{Object}} params - Query parameters.")?;
            }
            if stub.has_body {
                writeln!(f, " * @param {{Object}} data - Request body.")?;
            }
            writeln!(f, " * @returns {{Promise}} The transport request promise.")?;
            writeln!(f, " */")?;
        }

        let name = export_name(&stub.name);
        writeln!(f, "export function {name}({}) {{", stub.arguments().join(", "))?;
        writeln!(f, "  return request({{")?;
        writeln!(f, "    url: {},", stub.url_expression(self.table))?;
        writeln!(f, "    method: '{}',", stub.method.as_str())?;
        if stub.has_query {
            writeln!(f, "    params,")?;
        }
        if stub.has_body {
            writeln!(f, "    data,")?;
        }
        writeln!(f, "  }});")?;
        writeln!(f, "}}")
    }
}
