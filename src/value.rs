use std::fmt;

use crate::callable::Callable;
use crate::class::Instance;

/// A runtime value.
///
/// Callables and instances are reference types: cloning a `Value` shares the
/// underlying object and equality compares identity.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Callable(Callable),
    Instance(Instance),
}

impl Value {
    /// Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Name of the runtime type, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Callable(_) => "callable",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    /// Same runtime type and same value; never coerces across types.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Writes `n` the way `print` shows it: integral values without a decimal
/// point, `Infinity`/`NaN` spelled out, and exponent form (`1e+21`, `1e-7`)
/// outside `[1e-6, 1e21)`. Everything else is the shortest round‑trip form.
pub fn format_number(f: &mut impl fmt::Write, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }

    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }

    if n == 0.0 {
        return f.write_str(if n.is_sign_negative() { "-0" } else { "0" });
    }

    let magnitude = n.abs();

    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{:e}", n);

        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&text),
        };
    }

    if n.fract() == 0.0 && magnitude < 1e15 {
        let mut buf: itoa::Buffer = itoa::Buffer::new();
        return f.write_str(buf.format(n as i64));
    }

    write!(f, "{}", n)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => format_number(f, *n),

            Value::String(s) => write!(f, "{}", s),

            Value::Callable(c) => write!(f, "{}", c),

            Value::Instance(i) => write!(f, "{}", i),
        }
    }
}
