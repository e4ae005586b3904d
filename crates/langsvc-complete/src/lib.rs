//! The completion engine: dispatches on the cursor's syntactic context and
//! assembles a ranked candidate list from lexical scope, inherited members,
//! static imports, and the classpath.
//!
//! Everything here is a pure function over a [`langsvc_facade::Scope`],
//! [`langsvc_facade::CompilerFacade`], and [`crate::ClassCatalogs`] — it
//! never touches the filesystem itself; the caller (the service
//! orchestrator) is responsible for building those inputs from a live
//! query.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod catalog;
mod engine;

pub use catalog::{ClassCatalogs, SourcepathClass};
pub use engine::{complete, CompletionConfig, FileCompletionState};

#[cfg(test)]
mod tests {
    use super::*;
    use langsvc_facade::{Member, Scope, TestFacade, Type};
    use langsvc_parse::completion_context;
    use langsvc_symbols::{Candidate, ElementKind};
    use std::collections::HashSet;

    fn file_state<'a>() -> FileCompletionState<'a> {
        FileCompletionState {
            has_package_declaration: true,
            has_type_declaration: true,
            inferred_package_name: "pkg",
            file_stem: "Demo",
        }
    }

    #[test]
    fn identifier_completion_lists_locals_from_enclosing_scopes() {
        let src = "class A {\n  int completeOuterField;\n  void m() {\n    int completeLocal = 1;\n    comp\n  }\n}\n";
        let offset = src.find("comp").unwrap() + "comp".len();
        let ctx = completion_context(src, offset);

        let inner = Scope::new().with_binding(Member::local("completeLocal", Type::class("int")));
        let outer =
            Scope::new().with_binding(Member::field("completeOuterField", "A", Type::class("int"), false));
        let scope = inner.with_parent(outer);
        let facade = TestFacade::new();
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();

        let result = complete(&ctx, Some(&scope), &[], None, &facade, &catalogs, &config, &file_state());
        let names: Vec<String> = result.iter().map(Candidate::dedup_key).collect();
        assert!(names.contains(&"completeLocal".to_string()));
        assert!(names.contains(&"completeOuterField".to_string()));
    }

    #[test]
    fn member_access_on_unresolvable_literal_receiver_falls_back_to_package_guess() {
        // classify_receiver cannot resolve a string literal to a type
        // without a real compiler behind get_type_element, so `"abc".` is
        // treated as an (empty) package guess rather than panicking or
        // fabricating members.
        let src = r#"class A { void m() { "abc".eq } }"#;
        let offset = src.find(".eq").unwrap() + 3;
        let ctx = completion_context(src, offset);

        let facade = TestFacade::new();
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();
        let result = complete(&ctx, None, &[], None, &facade, &catalogs, &config, &file_state());
        assert!(result.is_empty());
    }

    #[test]
    fn member_access_on_known_type_value_lists_members() {
        let foo = Type::class("pkg.Foo");
        let scope = Scope::new().with_binding(Member::local("f", foo.clone()));
        let facade = TestFacade::new().with_members(
            &foo,
            vec![Member::method("size", "pkg.Foo", vec![], Type::class("int"), false)],
        );
        let src = "class A { void m() { f.si } }";
        let offset = src.find("f.si").unwrap() + "f.si".len();
        let ctx = completion_context(src, offset);
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();

        let result = complete(&ctx, Some(&scope), &[], None, &facade, &catalogs, &config, &file_state());
        assert!(result.iter().any(|c| c.dedup_key() == "size"));
    }

    #[test]
    fn static_member_completion_on_type_excludes_instance_members() {
        let string_ty = Type::class("java.lang.String");
        let facade = TestFacade::new()
            .with_type_element("String", string_ty.clone())
            .with_members(
                &string_ty,
                vec![
                    Member::method("valueOf", "java.lang.String", vec![Type::class("int")], string_ty.clone(), true),
                    Member::method("length", "java.lang.String", vec![], Type::class("int"), false),
                ],
            );
        let src = "class A { void m() { String. } }";
        let offset = src.find("String.").unwrap() + "String.".len();
        let ctx = completion_context(src, offset);
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();

        let result = complete(&ctx, None, &[], None, &facade, &catalogs, &config, &file_state());
        let names: HashSet<String> = result.iter().map(Candidate::dedup_key).collect();
        assert!(names.contains("valueOf"));
        assert!(!names.contains("length"));
        assert!(names.contains("class"));
        assert!(names.contains("this"));
    }

    #[test]
    fn case_label_completion_lists_enum_constants() {
        let color = Type::class("pkg.Color");
        let facade = TestFacade::new().with_type_element("pkg.Color", color.clone()).with_members(
            &color,
            vec![Member {
                kind: ElementKind::EnumConstant,
                simple_name: "RED".into(),
                owner: "pkg.Color".into(),
                ty: color.clone(),
                is_static: true,
                params: vec![],
            }],
        );
        let src = "class A { void m() { switch (c) { case RE: } } }";
        let offset = src.find("RE:").unwrap() + 2;
        let ctx = completion_context(src, offset);
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();

        let result =
            complete(&ctx, None, &[], Some(&color), &facade, &catalogs, &config, &file_state());
        assert!(result.iter().any(|c| c.dedup_key() == "RED"));
    }

    #[test]
    fn import_path_completion_lists_matching_classpath_segments() {
        let mut jdk = HashSet::new();
        jdk.insert("java.util.List".to_string());
        jdk.insert("java.util.Map".to_string());
        let catalogs = ClassCatalogs::new(jdk, HashSet::new(), vec![]);
        let facade = TestFacade::new();
        let config = CompletionConfig::default();

        let src = "import java.util.Li";
        let ctx = completion_context(src, src.len());
        let result = complete(&ctx, None, &[], None, &facade, &catalogs, &config, &file_state());
        assert!(result.iter().any(|c| matches!(c, Candidate::ClassName { qualified_name, .. } if qualified_name == "java.util.List")));
    }

    #[test]
    fn top_level_completion_offers_package_and_class_snippets_when_missing() {
        let src = "cla";
        let ctx = completion_context(src, src.len());
        let facade = TestFacade::new();
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig::default();
        let file = FileCompletionState {
            has_package_declaration: false,
            has_type_declaration: false,
            inferred_package_name: "com.example",
            file_stem: "Demo",
        };

        let result = complete(&ctx, None, &[], None, &facade, &catalogs, &config, &file);
        assert!(result.iter().any(|c| matches!(c, Candidate::Snippet { label, .. } if label == "package")));
        assert!(result.iter().any(|c| matches!(c, Candidate::Snippet { label, .. } if label.starts_with("class"))));
    }

    #[test]
    fn bounding_truncates_and_does_not_panic() {
        let mut scope = Scope::new();
        for i in 0..500 {
            scope = scope.with_binding(Member::local(format!("completeMany{i}"), Type::class("int")));
        }
        let src = "class A { void m() { completeMany } }";
        let offset = src.find("completeMany").unwrap() + "completeMany".len();
        let ctx = completion_context(src, offset);
        let facade = TestFacade::new();
        let catalogs = ClassCatalogs::default();
        let config = CompletionConfig { max_candidates: 10 };

        let result = complete(&ctx, Some(&scope), &[], None, &facade, &catalogs, &config, &file_state());
        assert_eq!(result.len(), 10);
    }
}
