mod common;

#[cfg(test)]
mod interpreter_tests {
    use crate::common;
    use crate::common::{errors_of, output_of};

    use rox::interpreter::Interpreter;
    use rox::parser::Parser;
    use rox::resolver::Resolver;
    use rox::scanner::scan_tokens;
    use rox::value::Value;

    #[test]
    fn arithmetic_comparison_and_rendering() {
        let output = output_of(
            "print 1 + 2;
             print 7 / 2;
             print -3 * 2;
             print 10 - 0.5;
             print 2 >= 2;
             print 1 < 0;
             print nil;
             print \"text\";
             print !nil;",
        );

        assert_eq!(output, "3\n3.5\n-6\n9.5\ntrue\nfalse\nnil\ntext\ntrue\n");
    }

    #[test]
    fn truthiness_only_nil_and_false_are_falsy() {
        let output = output_of(
            "if (0) print \"zero\";
             if (\"\") print \"empty\";
             if (nil) print \"nil\"; else print \"not nil\";
             if (false) print \"false\"; else print \"not false\";",
        );

        assert_eq!(output, "zero\nempty\nnot nil\nnot false\n");
    }

    #[test]
    fn equality_never_coerces_across_types() {
        let output = output_of(
            "print nil == nil;
             print nil == false;
             print 1 == \"1\";
             print \"a\" == \"a\";
             print 0 == false;
             print 2 != 3;",
        );

        assert_eq!(output, "true\nfalse\nfalse\ntrue\nfalse\ntrue\n");
    }

    #[test]
    fn logical_operators_short_circuit_and_yield_operands() {
        let output = output_of(
            "print nil or \"fallback\";
             print 1 and 2;
             print false and undefinedName;
             print true or undefinedName;",
        );

        assert_eq!(output, "fallback\n2\nfalse\ntrue\n");
    }

    #[test]
    fn string_plus_number_concatenates_but_not_the_reverse() {
        assert_eq!(output_of("print \"a\" + 1;"), "a1\n");
        assert_eq!(output_of("print \"n=\" + 2.5;"), "n=2.5\n");

        let (_, errors) = errors_of("print 1 + \"a\";");
        assert_eq!(
            errors,
            ["Operands must be two numbers or two strings.\n[line 1]"]
        );
    }

    #[test]
    fn operand_type_faults() {
        let (_, errors) = errors_of("print -\"x\";");
        assert_eq!(errors, ["Operand must be a number.\n[line 1]"]);

        let (_, errors) = errors_of("print 1 < \"2\";");
        assert_eq!(errors, ["Operands must be numbers.\n[line 1]"]);

        let (_, errors) = errors_of("print true * 2;");
        assert_eq!(errors, ["Operands must be numbers.\n[line 1]"]);
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        let output = output_of(
            "print 1 / 0;
             print -1 / 0;
             print 0 / 0;
             print \"a\" + 1 / 0;
             print 1 / 0 > 1000000;",
        );

        assert_eq!(output, "Infinity\n-Infinity\nNaN\naInfinity\ntrue\n");
    }

    #[test]
    fn extreme_magnitudes_switch_to_exponent_form() {
        let output = output_of(
            "print 1000000000000000000000;
             print 100000000000000000000;
             print 0.0000001;
             print 0.000001;
             print -0.00000015;
             print \"n=\" + 1000000000000000000000;",
        );

        assert_eq!(
            output,
            "1e+21\n100000000000000000000\n1e-7\n0.000001\n-1.5e-7\nn=1e+21\n"
        );
    }

    #[test]
    fn block_scoping_and_shadowing() {
        let output = output_of(
            "var a = \"global a\";
             var b = \"global b\";
             {
               var a = \"outer a\";
               {
                 var a = \"inner a\";
                 print a;
                 print b;
                 b = \"changed b\";
               }
               print a;
             }
             print a;
             print b;",
        );

        assert_eq!(
            output,
            "inner a\nglobal b\nouter a\nglobal a\nchanged b\n"
        );
    }

    #[test]
    fn redeclaring_a_global_rebinds_it() {
        assert_eq!(output_of("var a = 1; var a = 2; print a;"), "2\n");
    }

    #[test]
    fn variable_holding_nil_is_still_defined() {
        assert_eq!(output_of("var a; print a; a = 3; print a;"), "nil\n3\n");
    }

    #[test]
    fn undefined_variable_read_and_write() {
        let (_, errors) = errors_of("print missing;");
        assert_eq!(errors, ["Undefined variable 'missing'.\n[line 1]"]);

        let (_, errors) = errors_of("missing = 1;");
        assert_eq!(errors, ["Undefined variable 'missing'.\n[line 1]"]);
    }

    #[test]
    fn while_and_desugared_for_loops() {
        let output = output_of(
            "var i = 0;
             while (i < 3) { print i; i = i + 1; }
             for (var j = 10; j > 7; j = j - 1) print j;",
        );

        assert_eq!(output, "0\n1\n2\n10\n9\n8\n");
    }

    #[test]
    fn closures_capture_by_reference() {
        let output = output_of(
            "fun makeCounter() {
               var i = 0;
               fun count() { i = i + 1; print i; }
               return count;
             }
             var c = makeCounter();
             c();
             c();
             var d = makeCounter();
             d();",
        );

        assert_eq!(output, "1\n2\n1\n");
    }

    #[test]
    fn closures_sharing_one_environment_see_each_others_writes() {
        let output = output_of(
            "var get; var set;
             fun pair() {
               var v = \"initial\";
               fun g() { print v; }
               fun s(x) { v = x; }
               get = g;
               set = s;
             }
             pair();
             get();
             set(\"updated\");
             get();",
        );

        assert_eq!(output, "initial\nupdated\n");
    }

    #[test]
    fn recursion_and_return_unwinding_through_loops() {
        let output = output_of(
            "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
             print fib(10);
             fun find(limit) {
               var i = 0;
               while (true) {
                 { if (i * i > limit) return i; }
                 i = i + 1;
               }
             }
             print find(50);",
        );

        assert_eq!(output, "55\n8\n");
    }

    #[test]
    fn function_without_return_yields_nil() {
        assert_eq!(
            output_of("fun f() { var x = 1; } print f(); fun g() { return; } print g();"),
            "nil\nnil\n"
        );
    }

    #[test]
    fn arity_mismatch_aborts_the_run() {
        let (output, errors) = errors_of("fun f(a) { print a; } print \"start\"; f(); print \"never\";");

        assert_eq!(output, "start\n");
        assert_eq!(errors, ["Expected 1 arguments but got 0.\n[line 1]"]);

        let (_, errors) = errors_of("fun f(a) {}\nf(1, 2);");
        assert_eq!(errors, ["Expected 1 arguments but got 2.\n[line 2]"]);
    }

    #[test]
    fn calling_a_non_callable_faults() {
        let (_, errors) = errors_of("var x = 5; x();");
        assert_eq!(errors, ["Can only call functions and classes.\n[line 1]"]);
    }

    #[test]
    fn callables_render_descriptively() {
        let output = output_of(
            "fun f() {}
             class Point {}
             print f;
             print Point;
             print Point();
             print clock;",
        );

        assert_eq!(output, "<fn f>\nPoint\n<Point instance>\n<native fn>\n");
    }

    #[test]
    fn native_clock_measures_seconds_since_start() {
        let output = output_of(
            "var a = clock();
             var b = clock();
             print a >= 0;
             print a < 60;
             print b >= a;",
        );

        assert_eq!(output, "true\ntrue\ntrue\n");
    }

    #[test]
    fn runaway_recursion_faults_instead_of_crashing() {
        let (output, errors) = common::on_interpreter_stack(|| {
            errors_of("fun down(n) { return down(n + 1); }\nprint \"start\";\ndown(0);")
        });

        assert_eq!(output, "start\n");
        assert_eq!(errors, ["Stack overflow.\n[line 1]"]);
    }

    #[test]
    fn call_depth_recovers_after_a_stack_overflow() {
        let output = common::on_interpreter_stack(|| {
            let (mut interpreter, buffer) = common::interpreter();

            let deep = "fun count(n) { if (n == 0) return 0; return 1 + count(n - 1); }
                        print count(900);";
            rox::run(&mut interpreter, deep).expect("900 nested calls fit");

            let errors = rox::run(&mut interpreter, "count(5000);").expect_err("too deep");
            assert_eq!(errors[0].to_string(), "Stack overflow.\n[line 1]");

            rox::run(&mut interpreter, "print count(900);").expect("depth was reset");
            buffer.contents()
        });

        assert_eq!(output, "900\n900\n");
    }

    #[test]
    fn fields_are_upserted_and_shadow_methods() {
        let output = output_of(
            "class Box { describe() { return \"method\"; } }
             var b = Box();
             print b.describe();
             b.value = 1;
             b.value = b.value + 1;
             print b.value;
             b.describe = \"field\";
             print b.describe;",
        );

        assert_eq!(output, "method\n2\nfield\n");
    }

    #[test]
    fn property_access_faults() {
        let (_, errors) = errors_of("var x = 1; print x.y;");
        assert_eq!(errors, ["Only instances have properties.\n[line 1]"]);

        let (_, errors) = errors_of("var x = \"s\"; x.y = 2;");
        assert_eq!(errors, ["Only instances have fields.\n[line 1]"]);

        let (_, errors) = errors_of("class A {} print A().missing;");
        assert_eq!(errors, ["Undefined property 'missing'.\n[line 1]"]);
    }

    #[test]
    fn methods_bind_this_and_stay_bound_when_extracted() {
        let output = output_of(
            "class Person {
               init(name) { this.name = name; }
               greet() { print \"hi \" + this.name; }
             }
             var alice = Person(\"alice\");
             var greet = alice.greet;
             alice.name = \"alicia\";
             greet();
             var bob = Person(\"bob\");
             bob.greet = alice.greet;
             bob.greet();",
        );

        assert_eq!(output, "hi alicia\nhi alicia\n");
    }

    #[test]
    fn each_method_access_yields_a_fresh_binding() {
        let output = output_of(
            "class A { m() {} }
             var a = A();
             print a.m == a.m;
             var m = a.m;
             print m == m;",
        );

        assert_eq!(output, "false\ntrue\n");
    }

    #[test]
    fn initializer_always_yields_the_instance() {
        let output = output_of(
            "class Thing {
               init(flag) {
                 this.flag = flag;
                 if (flag) return;
                 this.late = true;
               }
             }
             var t = Thing(true);
             print t;
             print t.flag;
             print t.init(false) == t;
             print t.late;",
        );

        assert_eq!(output, "<Thing instance>\ntrue\ntrue\ntrue\n");
    }

    #[test]
    fn class_arity_follows_init() {
        let (_, errors) = errors_of("class P { init(x, y) {} } P(1);");
        assert_eq!(errors, ["Expected 2 arguments but got 1.\n[line 1]"]);

        let (_, errors) = errors_of("class Q {} Q(1);");
        assert_eq!(errors, ["Expected 0 arguments but got 1.\n[line 1]"]);
    }

    #[test]
    fn inheritance_and_super_calls() {
        let output = output_of(
            "class A { greet() { print \"A\"; } }
             class B < A { greet() { super.greet(); print \"B\"; } }
             B().greet();",
        );

        assert_eq!(output, "A\nB\n");
    }

    #[test]
    fn super_resolves_from_the_declaring_class_not_the_receiver() {
        let output = output_of(
            "class A { method() { print \"A method\"; } }
             class B < A {
               method() { print \"B method\"; }
               test() { super.method(); }
             }
             class C < B {}
             C().test();",
        );

        assert_eq!(output, "A method\n");
    }

    #[test]
    fn inherited_initializer_and_methods() {
        let output = output_of(
            "class Base { init(v) { this.v = v; } show() { print this.v; } }
             class Derived < Base {}
             var d = Derived(42);
             d.show();",
        );

        assert_eq!(output, "42\n");
    }

    #[test]
    fn superclass_must_be_a_class() {
        let (_, errors) = errors_of("var NotAClass = 1;\nclass Sub < NotAClass {}");
        assert_eq!(errors, ["Superclass must be a class.\n[line 2]"]);
    }

    #[test]
    fn undefined_super_method_faults() {
        let (_, errors) = errors_of(
            "class A {}
             class B < A { m() { super.nope(); } }
             B().m();",
        );
        assert_eq!(errors, ["Undefined property 'nope'.\n[line 2]"]);
    }

    #[test]
    fn methods_can_refer_to_their_own_class_by_name() {
        let output = output_of(
            "class Node {
               make() { return Node(); }
             }
             print Node().make();",
        );

        assert_eq!(output, "<Node instance>\n");
    }

    #[test]
    fn self_referential_closure_cycle_is_tolerated() {
        let output = output_of(
            "fun outer() {
               var self;
               fun inner() { return self; }
               self = inner;
               return inner;
             }
             var f = outer();
             print f() == f;",
        );

        assert_eq!(output, "true\n");
    }

    #[test]
    fn runtime_fault_inside_nested_call_restores_global_scope() {
        let (mut interpreter, buffer) = common::interpreter();

        let result = rox::run(&mut interpreter, "fun f() { var local = 1; return nope; } f();");
        assert!(result.is_err());

        rox::run(&mut interpreter, "var after = \"ok\"; print after;").expect("second run succeeds");
        assert_eq!(buffer.contents(), "ok\n");
        assert!(interpreter.globals().borrow().contains("after"));
        assert!(!interpreter.globals().borrow().contains("local"));
    }

    #[test]
    fn definitions_persist_between_runs_on_one_interpreter() {
        let (mut interpreter, buffer) = common::interpreter();

        rox::run(&mut interpreter, "fun add(a, b) { return a + b; }").expect("defines");
        rox::run(&mut interpreter, "{ var x = 2; print add(x, 3); }").expect("calls");

        assert_eq!(buffer.contents(), "5\n");
    }

    #[test]
    fn reinterpreting_the_same_tree_is_idempotent() {
        let source = "class Counter {
                        init() { this.n = 0; }
                        bump() { this.n = this.n + 1; return this; }
                      }
                      var c = Counter();
                      c.bump().bump();
                      fun twice(f) { f(); f(); }
                      {
                        var x = \"x\";
                        fun show() { print x + c.n; }
                        twice(show);
                      }";

        let tokens = scan_tokens(source).expect("scans");
        let statements = Parser::new(tokens).parse().expect("parses");

        let mut outputs = Vec::new();

        for _ in 0..2 {
            let (mut interpreter, buffer) = common::interpreter();
            Resolver::new(&mut interpreter)
                .resolve(&statements)
                .expect("resolves");
            interpreter.interpret(&statements).expect("runs");
            outputs.push(buffer.contents());
        }

        assert_eq!(outputs[0], "x2\nx2\n");
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn host_functions_can_be_registered() {
        let (mut interpreter, buffer) = common::interpreter();

        interpreter.define_native("double", 1, |_interpreter, args| match &args[0] {
            Value::Number(n) => Ok(Value::Number(n * 2.0)),
            _ => Err("double expects a number.".to_string()),
        });

        rox::run(&mut interpreter, "print double(21);").expect("runs");
        assert_eq!(buffer.contents(), "42\n");

        let errors = rox::run(&mut interpreter, "double(\"x\");").expect_err("faults");
        assert_eq!(errors[0].to_string(), "double expects a number.\n[line 1]");
    }

    #[test]
    fn static_errors_from_every_pass_are_reported_together() {
        let (output, errors) = errors_of("print @;\nprint 1");

        assert_eq!(
            errors,
            [
                "[line 1] Error: Unexpected character: @",
                "[line 1] Error at ';': Expect expression.",
                "[line 2] Error at end: Expect ';' after value.",
            ]
        );
        assert_eq!(output, "");
    }

    #[test]
    fn fresh_interpreter_starts_with_only_clock() {
        let interpreter = Interpreter::default();
        let globals = interpreter.globals();

        assert!(globals.borrow().contains("clock"));
        assert!(!globals.borrow().contains("print"));
    }
}
