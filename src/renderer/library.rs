use super::{filters::*, functions::*};
use minijinja::{AutoEscape, Environment};

/// Fixed set of helpers available to every template.
///
/// Built once and cloned for each compilation, so templates never share
/// mutable engine state.
#[derive(Clone)]
pub struct FunctionLibrary {
    env: Environment<'static>,
}

impl FunctionLibrary {
    /// Creates the library with every filter and function registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_filter("to_yaml", to_yaml);
        env.add_filter("from_yaml", from_yaml);
        env.add_filter("from_json", from_json);
        env.add_filter("b64enc", b64enc);
        env.add_filter("b64dec", b64dec);
        env.add_filter("sha256sum", sha256sum);
        env.add_filter("regex", regex_filter);
        env.add_filter("regex_replace", regex_replace);
        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("train_case", to_train_case);

        env.add_function("get_composite_resource", get_composite_resource);
        env.add_function("get_composed_resource", get_composed_resource);
        env.add_function("get_extra_resources", get_extra_resources);
        env.add_function("get_resource_condition", get_resource_condition);
        env.add_function("set_resource_name_annotation", set_resource_name_annotation);

        Self { env }
    }

    /// Returns a fresh engine carrying the library.
    pub fn environment(&self) -> Environment<'static> {
        self.env.clone()
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_template(template: &str, expected: &str) {
        let env = FunctionLibrary::new().environment();
        let result = env.render_str(template, json!({})).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_string_conversion_filters() {
        test_template("{{ 'hello world' | camel_case }}", "helloWorld");
        test_template("{{ 'hello world' | kebab_case }}", "hello-world");
        test_template("{{ 'hello world' | pascal_case }}", "HelloWorld");
        test_template("{{ 'hello world' | screaming_snake_case }}", "HELLO_WORLD");
        test_template("{{ 'hello world' | snake_case }}", "hello_world");
        test_template("{{ 'hello world' | train_case }}", "Hello-World");
    }

    #[test]
    fn test_serialization_filters() {
        test_template("{{ {'a': [1, 2]} | to_yaml }}", "a:\n- 1\n- 2");
        test_template("{{ ('b: 3' | from_yaml).b }}", "3");
        test_template("{{ ('{\"c\": \"d\"}' | from_json).c }}", "d");
        test_template("{{ {'a': 1} | tojson }}", "{\"a\":1}");
    }

    #[test]
    fn test_encoding_filters() {
        test_template("{{ 'hello' | b64enc }}", "aGVsbG8=");
        test_template("{{ 'aGVsbG8=' | b64dec }}", "hello");
        test_template(
            "{{ 'abc' | sha256sum }}",
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        );
    }

    #[test]
    fn test_regex_filters() {
        test_template("{{ 'hello world' | regex('^hello') }}", "true");
        test_template("{{ 'Hello World' | regex('hello') }}", "false");
        test_template("{{ 'hello' | regex('[') }}", "false");
        test_template("{{ 'a.b.c' | regex_replace('\\\\.', '-') }}", "a-b-c");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        test_template("a: 1\n", "a: 1\n");
    }

    #[test]
    fn test_output_is_not_escaped() {
        test_template("{{ '<a & b>' }}", "<a & b>");
    }
}
