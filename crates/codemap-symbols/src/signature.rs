use codemap_common::lang::Language;

/// Renders a language-appropriate signature string, dispatched by language
/// family. Only invoked at detail ≥ signatures.
pub fn render(
    lang: Language,
    name: &str,
    receiver: Option<&str>,
    params: &str,
    result: Option<&str>,
) -> String {
    let result = result.unwrap_or("").trim();
    match lang {
        Language::Go => {
            let receiver = receiver.map(|r| format!("{r} ")).unwrap_or_default();
            if result.is_empty() {
                format!("func {receiver}{name}{params}")
            } else {
                format!("func {receiver}{name}{params} {result}")
            }
        }
        Language::Python => {
            if result.is_empty() {
                format!("def {name}{params}")
            } else {
                format!("def {name}{params} -> {result}")
            }
        }
        Language::Rust => {
            if result.is_empty() {
                format!("fn {name}{params}")
            } else {
                format!("fn {name}{params} -> {result}")
            }
        }
        Language::Java | Language::CSharp | Language::Cpp | Language::C => {
            if result.is_empty() {
                format!("{name}{params}")
            } else {
                format!("{result} {name}{params}")
            }
        }
        Language::JavaScript
        | Language::TypeScript
        | Language::Ruby
        | Language::Swift
        | Language::Kotlin
        | Language::Php
        | Language::Dart
        | Language::Bash
        | Language::R => {
            if result.is_empty() {
                format!("{name}{params}")
            } else {
                format!("{name}{params}: {result}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_style_with_receiver() {
        let sig = render(Language::Go, "Greet", Some("(u *User)"), "()", Some("string"));
        assert_eq!(sig, "func (u *User) Greet() string");
    }

    #[test]
    fn python_style() {
        let sig = render(Language::Python, "greet", None, "(name)", Some("str"));
        assert_eq!(sig, "def greet(name) -> str");
    }

    #[test]
    fn rust_style_no_result() {
        let sig = render(Language::Rust, "noop", None, "()", None);
        assert_eq!(sig, "fn noop()");
    }
}
