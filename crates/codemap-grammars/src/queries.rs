use codemap_common::lang::Language;

/// The embedded symbol capture query for `lang`, using the
/// `func.*`/`type.*`/`import`/`module` capture-name convention. Every
/// language returns a query; coverage depth varies with how expressive the
/// grammar's node types are for that language.
pub fn symbol_query_source(lang: Language) -> &'static str {
    match lang {
        Language::Rust => {
            r#"
            (function_item
              name: (identifier) @func.name
              parameters: (parameters) @func.params
              return_type: (_)? @func.result) @func.item

            (struct_item name: (type_identifier) @type.name) @type.struct
            (enum_item name: (type_identifier) @type.name) @type.enum
            (trait_item name: (type_identifier) @type.name) @type.trait
            (type_item name: (type_identifier) @type.name) @type.alias

            (use_declaration argument: (_) @import)
            "#
        }
        Language::Python => {
            r#"
            (function_definition
              name: (identifier) @func.name
              parameters: (parameters) @func.params
              return_type: (_)? @func.result) @func.item

            (class_definition name: (identifier) @type.name) @type.class

            (import_statement name: (dotted_name) @import)
            (import_from_statement module_name: (dotted_name) @import)
            (import_from_statement module_name: (relative_import) @import)
            "#
        }
        Language::JavaScript => {
            r#"
            (function_declaration
              name: (identifier) @func.name
              parameters: (formal_parameters) @func.params) @func.item

            (method_definition
              name: (property_identifier) @func.name
              parameters: (formal_parameters) @func.params) @func.item

            (class_declaration name: (identifier) @type.name) @type.class

            (import_statement source: (string) @import)
            "#
        }
        Language::TypeScript => {
            r#"
            (function_declaration
              name: (identifier) @func.name
              parameters: (formal_parameters) @func.params
              return_type: (_)? @func.result) @func.item

            (method_definition
              name: (property_identifier) @func.name
              parameters: (formal_parameters) @func.params
              return_type: (_)? @func.result) @func.item

            (class_declaration name: (type_identifier) @type.name) @type.class
            (interface_declaration name: (type_identifier) @type.name) @type.interface

            (import_statement source: (string) @import)
            "#
        }
        Language::Go => {
            r#"
            (function_declaration
              name: (identifier) @func.name
              parameters: (parameter_list) @func.params
              result: (_)? @func.result) @func.item

            (method_declaration
              receiver: (parameter_list) @func.receiver
              name: (field_identifier) @func.name
              parameters: (parameter_list) @func.params
              result: (_)? @func.result) @func.item

            (type_spec name: (type_identifier) @type.name type: (struct_type)) @type.struct
            (type_spec name: (type_identifier) @type.name type: (interface_type)) @type.interface

            (import_spec path: (interpreted_string_literal) @import)
            "#
        }
        Language::Java => {
            r#"
            (method_declaration
              name: (identifier) @func.name
              parameters: (formal_parameters) @func.params
              type: (_)? @func.result) @func.item

            (class_declaration name: (identifier) @type.name) @type.class
            (interface_declaration name: (identifier) @type.name) @type.interface
            (enum_declaration name: (identifier) @type.name) @type.enum

            (import_declaration (scoped_identifier) @import)
            "#
        }
        Language::CSharp => {
            r#"
            (method_declaration
              name: (identifier) @func.name
              parameters: (parameter_list) @func.params
              type: (_)? @func.result) @func.item

            (class_declaration name: (identifier) @type.name) @type.class
            (interface_declaration name: (identifier) @type.name) @type.interface
            (enum_declaration name: (identifier) @type.name) @type.enum

            (using_directive (qualified_name) @import)
            "#
        }
        Language::C => {
            r#"
            (function_definition
              declarator: (function_declarator
                declarator: (identifier) @func.name
                parameters: (parameter_list) @func.params)) @func.item

            (struct_specifier name: (type_identifier) @type.name) @type.struct

            (preproc_include path: (_) @import)
            "#
        }
        Language::Cpp => {
            r#"
            (function_definition
              declarator: (function_declarator
                declarator: (identifier) @func.name
                parameters: (parameter_list) @func.params)) @func.item

            (function_definition
              declarator: (function_declarator
                declarator: (field_identifier) @func.name
                parameters: (parameter_list) @func.params)) @func.item

            (struct_specifier name: (type_identifier) @type.name) @type.struct
            (class_specifier name: (type_identifier) @type.name) @type.class

            (preproc_include path: (_) @import)
            "#
        }
        Language::Ruby => {
            r#"
            (method
              name: (identifier) @func.name
              parameters: (method_parameters)? @func.params) @func.item

            (class name: (constant) @type.name) @type.class
            (module name: (constant) @module)

            (call
              method: (identifier) @_require
              arguments: (argument_list (string) @import)
              (#any-of? @_require "require" "require_relative"))
            "#
        }
        Language::Swift => {
            r#"
            (function_declaration
              name: (simple_identifier) @func.name
              parameters: (parameter_clause) @func.params) @func.item

            (class_declaration name: (type_identifier) @type.name) @type.class

            (import_declaration (identifier) @import)
            "#
        }
        Language::Kotlin => {
            r#"
            (function_declaration
              name: (simple_identifier) @func.name
              parameters: (function_value_parameters) @func.params) @func.item

            (class_declaration name: (type_identifier) @type.name) @type.class

            (import_header (identifier) @import)
            "#
        }
        Language::Php => {
            r#"
            (function_definition
              name: (name) @func.name
              parameters: (formal_parameters) @func.params) @func.item

            (method_declaration
              name: (name) @func.name
              parameters: (formal_parameters) @func.params) @func.item

            (class_declaration name: (name) @type.name) @type.class
            (interface_declaration name: (name) @type.name) @type.interface

            (namespace_use_clause (qualified_name) @import)
            "#
        }
        Language::Dart => {
            r#"
            (function_signature
              name: (identifier) @func.name
              parameters: (formal_parameter_list) @func.params) @func.item

            (class_definition name: (identifier) @type.name) @type.class

            (import_or_export (uri (string_literal) @import))
            "#
        }
        Language::Bash => {
            r#"
            (function_definition name: (word) @func.name) @func.item
            "#
        }
        Language::R => {
            r#"
            (binary_operator
              lhs: (identifier) @func.name
              operator: "<-"
              rhs: (function_definition parameters: (formal_parameters) @func.params)) @func.item
            "#
        }
    }
}

/// The embedded call capture query for `lang`, using `call.name`,
/// `call.args`, and optionally `call.receiver`. Returns `None` for
/// languages with no call query — such languages are excluded from call
/// edge construction per the external interface.
pub fn call_query_source(lang: Language) -> Option<&'static str> {
    Some(match lang {
        Language::Rust => {
            r#"
            (call_expression
              function: (identifier) @call.name
              arguments: (arguments) @call.args)

            (call_expression
              function: (field_expression
                value: (_) @call.receiver
                field: (field_identifier) @call.name)
              arguments: (arguments) @call.args)
            "#
        }
        Language::Python => {
            r#"
            (call
              function: (identifier) @call.name
              arguments: (argument_list) @call.args)

            (call
              function: (attribute
                object: (_) @call.receiver
                attribute: (identifier) @call.name)
              arguments: (argument_list) @call.args)
            "#
        }
        Language::JavaScript | Language::TypeScript => {
            r#"
            (call_expression
              function: (identifier) @call.name
              arguments: (arguments) @call.args)

            (call_expression
              function: (member_expression
                object: (_) @call.receiver
                property: (property_identifier) @call.name)
              arguments: (arguments) @call.args)
            "#
        }
        Language::Go => {
            r#"
            (call_expression
              function: (identifier) @call.name
              arguments: (argument_list) @call.args)

            (call_expression
              function: (selector_expression
                operand: (_) @call.receiver
                field: (field_identifier) @call.name)
              arguments: (argument_list) @call.args)
            "#
        }
        Language::Java | Language::CSharp => {
            r#"
            (method_invocation
              name: (identifier) @call.name
              arguments: (argument_list) @call.args)
            "#
        }
        Language::C | Language::Cpp => {
            r#"
            (call_expression
              function: (identifier) @call.name
              arguments: (argument_list) @call.args)

            (call_expression
              function: (field_expression
                field: (field_identifier) @call.name)
              arguments: (argument_list) @call.args)
            "#
        }
        Language::Ruby => {
            r#"
            (call
              method: (identifier) @call.name
              arguments: (argument_list) @call.args)
            "#
        }
        Language::Php => {
            r#"
            (function_call_expression
              function: (name) @call.name
              arguments: (arguments) @call.args)
            "#
        }
        Language::Swift | Language::Kotlin | Language::Dart | Language::Bash | Language::R => {
            return None
        }
    })
}
