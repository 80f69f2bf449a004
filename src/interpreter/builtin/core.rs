use std::f64::consts;

use crate::interpreter::{
    builtin::{algebra, print, trigonometry},
    environment::Environment,
    value::{
        callable::{Arity, Callable, Constructor, Family, NativeOperation},
        core::Value,
    },
};

/// Defines a group of native operations as a static table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the operation.
///
/// The macro produces a `pub static` slice of [`NativeOperation`] named after
/// the group.
macro_rules! builtin_group {
    (
        $group:ident {
            $(
                $name:literal => {
                    arity: $arity:expr,
                    func: $func:expr $(,)?
                }
            ),* $(,)?
        }
    ) => {
        pub static $group: &[NativeOperation] = &[
            $(
                NativeOperation { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_group! {
    IO {
        "print" => { arity: Arity::AtLeast(1), func: print::print },
    }
}

builtin_group! {
    ALGEBRA {
        "derive"    => { arity: Arity::Exact(1), func: |args, _, line| algebra::derive(args, line) },
        "integrate" => { arity: Arity::Exact(1), func: |args, _, line| algebra::integrate(args, line) },
        "fact"      => { arity: Arity::Exact(1), func: |args, _, line| algebra::fact(args, line) },
        "binomial"  => { arity: Arity::Exact(2), func: |args, _, line| algebra::binomial(args, line) },
        "sin"       => { arity: Arity::Exact(1), func: |args, _, line| trigonometry::sin(args, line) },
        "cos"       => { arity: Arity::Exact(1), func: |args, _, line| trigonometry::cos(args, line) },
        "tan"       => { arity: Arity::Exact(1), func: |args, _, line| trigonometry::tan(args, line) },
        "pow"       => { arity: Arity::Exact(2), func: |args, _, line| algebra::pow(args, line) },
        "sqrt"      => { arity: Arity::Exact(1), func: |args, _, line| algebra::unary("sqrt", args, line) },
        "floor"     => { arity: Arity::Exact(1), func: |args, _, line| algebra::unary("floor", args, line) },
        "ceiling"   => { arity: Arity::Exact(1), func: |args, _, line| algebra::unary("ceiling", args, line) },
        "round"     => { arity: Arity::Exact(1), func: |args, _, line| algebra::unary("round", args, line) },
    }
}

/// The dimensioned constructors.
pub const TYPES: &[Family] = &[Family::Matrix, Family::Vector];

/// Named numeric constants.
pub const CONSTANTS: &[(&str, f64)] = &[("e", consts::E), ("pi", consts::PI)];

/// Binds every builtin operation, constructor and constant in `env`.
pub fn preload(env: &mut Environment) {
    for op in IO.iter().chain(ALGEBRA) {
        env.define(op.name, Callable::Native(*op).into());
    }
    for family in TYPES {
        env.define(family.name(), Callable::Constructor(Constructor::unbound(*family)).into());
    }
    for (name, value) in CONSTANTS {
        env.define(*name, Value::Number(*value));
    }
}
