#[cfg(test)]
mod environment_tests {
    use rox::environment::Environment;
    use rox::token::Token;
    use rox::value::Value;

    fn name(lexeme: &str) -> Token {
        Token::identifier(lexeme, 7)
    }

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn get_walks_outward_and_define_stays_local() {
        let global = Environment::global();
        global.borrow_mut().define("a", text("outer"));

        let inner = Environment::enclosed(global.clone());
        assert_eq!(inner.borrow().get(&name("a")), Ok(text("outer")));

        inner.borrow_mut().define("a", text("shadow"));
        assert_eq!(inner.borrow().get(&name("a")), Ok(text("shadow")));
        assert_eq!(global.borrow().get(&name("a")), Ok(text("outer")));
    }

    #[test]
    fn assign_updates_the_nearest_binding() {
        let global = Environment::global();
        global.borrow_mut().define("n", Value::Number(1.0));

        let inner = Environment::enclosed(global.clone());
        inner
            .borrow_mut()
            .assign(&name("n"), Value::Number(2.0))
            .expect("n exists in the enclosing scope");

        assert_eq!(global.borrow().get(&name("n")), Ok(Value::Number(2.0)));
        assert!(!inner.borrow().contains("n"));
    }

    #[test]
    fn get_at_and_assign_at_jump_directly_to_an_ancestor() {
        let global = Environment::global();
        global.borrow_mut().define("x", text("global"));

        let middle = Environment::enclosed(global.clone());
        middle.borrow_mut().define("x", text("middle"));

        let inner = Environment::enclosed(middle.clone());

        assert_eq!(inner.borrow().get_at(1, &name("x")), Ok(text("middle")));
        assert_eq!(inner.borrow().get_at(2, &name("x")), Ok(text("global")));

        inner
            .borrow_mut()
            .assign_at(2, &name("x"), Value::Bool(true))
            .expect("x exists two scopes out");

        assert_eq!(global.borrow().get(&name("x")), Ok(Value::Bool(true)));
        assert_eq!(middle.borrow().get(&name("x")), Ok(text("middle")));
    }

    #[test]
    fn nil_binding_is_present_not_missing() {
        let env = Environment::global();
        env.borrow_mut().define("empty", Value::Nil);

        assert!(env.borrow().contains("empty"));
        assert_eq!(env.borrow().get(&name("empty")), Ok(Value::Nil));
    }

    #[test]
    fn missing_names_report_undefined_variable_with_line() {
        let env = Environment::enclosed(Environment::global());

        let err = env.borrow().get(&name("ghost")).expect_err("not defined");
        assert_eq!(err.to_string(), "Undefined variable 'ghost'.\n[line 7]");

        let err = env
            .borrow_mut()
            .assign(&name("ghost"), Value::Nil)
            .expect_err("not defined");
        assert_eq!(err.message, "Undefined variable 'ghost'.");

        let err = env.borrow().get_at(0, &name("ghost")).expect_err("not here");
        assert_eq!(err.line, 7);
    }
}
