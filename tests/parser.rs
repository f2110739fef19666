mod common;

#[cfg(test)]
mod parser_tests {
    use crate::common;

    use rox::ast::{Expr, Stmt};
    use rox::ast_printer::AstPrinter;

    fn printed(source: &str) -> Vec<String> {
        common::parse(source)
            .expect("parses cleanly")
            .iter()
            .map(AstPrinter::print_stmt)
            .collect()
    }

    fn parse_errors(source: &str) -> Vec<String> {
        common::parse(source)
            .expect_err("should not parse")
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn precedence_climbs_from_assignment_to_primary() {
        assert_eq!(
            printed("print 1 + 2 * 3 - -4 / (5);"),
            ["(print (- (+ 1.0 (* 2.0 3.0)) (/ (- 4.0) (group 5.0))))"]
        );

        assert_eq!(
            printed("a = b or c and d == e < f;"),
            ["(; (= a (or b (and c (== d (< e f))))))"]
        );
    }

    #[test]
    fn calls_and_property_access_chain() {
        assert_eq!(
            printed("f(1)(2, 3).field.method();"),
            ["(; (call (. (. (call (call f 1.0) 2.0 3.0) field) method)))"]
        );

        assert_eq!(printed("a.b.c = 1;"), ["(; (= (. (. a b) c) 1.0))"]);
    }

    #[test]
    fn for_loop_desugars_to_block_and_while() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            ["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );

        // No initializer, condition or increment: a bare `while (true)`.
        assert_eq!(printed("for (;;) print 1;"), ["(while true (print 1.0))"]);
    }

    #[test]
    fn class_declaration_with_superclass_and_methods() {
        let statements = common::parse(
            "class B < A { init(x) { this.x = x; } greet() { super.greet(); } }",
        )
        .expect("parses cleanly");

        let Stmt::Class {
            name,
            superclass,
            methods,
        } = &statements[0]
        else {
            panic!("expected a class, got {:?}", statements[0]);
        };

        assert_eq!(name.lexeme, "B");
        assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].params.len(), 1);

        assert_eq!(
            AstPrinter::print_stmt(&statements[0]),
            "(class B < A (fun init (x) (; (= (. this x) x))) (fun greet () (; (call (super greet)))))"
        );
    }

    #[test]
    fn invalid_assignment_target_is_reported_at_equals() {
        assert_eq!(
            parse_errors("a + b = c;"),
            ["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn synchronize_reports_independent_errors_in_one_pass() {
        let errors = parse_errors("var = 1;\nprint 2;\nvar x = ;\nprint (3;\n");

        assert_eq!(
            errors,
            [
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect expression.",
                "[line 4] Error at ';': Expect ')' after expression.",
            ]
        );
    }

    #[test]
    fn error_at_end_of_input() {
        assert_eq!(
            parse_errors("print 1"),
            ["[line 1] Error at end: Expect ';' after value."]
        );

        assert_eq!(
            parse_errors("{ print 1;"),
            ["[line 1] Error at end: Expect '}' after block."]
        );
    }

    #[test]
    fn super_requires_a_method_name() {
        assert_eq!(
            parse_errors("class A < B { m() { super; } }"),
            ["[line 1] Error at ';': Expect '.' after 'super'."]
        );
    }

    #[test]
    fn too_many_arguments_is_reported_without_losing_the_call() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let errors = parse_errors(&source);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Cannot have more than 255 arguments."));
    }

    #[test]
    fn too_many_parameters_is_reported_without_losing_the_declaration() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}\nprint f;", params.join(", "));

        let errors = parse_errors(&source);

        assert_eq!(
            errors,
            ["[line 1] Error at 'p255': Cannot have more than 255 parameters."]
        );
    }

    #[test]
    fn variable_references_get_distinct_ids() {
        let statements = common::parse("a; a;").expect("parses cleanly");

        let ids: Vec<_> = statements
            .iter()
            .map(|stmt| match stmt {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }
}
