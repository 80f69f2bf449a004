/// Invocable values.
///
/// Defines `Callable`, the closed set of things call syntax can be applied
/// to: native operations from the builtin registry, polynomials and the
/// two-stage `mat`/`vec` constructors. Also holds the `Arity` used to check
/// argument counts before a native operation runs.
pub mod callable;
/// Polynomial functions.
///
/// Defines the `Function` type produced by lambda literals, with evaluation,
/// differentiation, integration and the canonical `f(x)=...` text form.
pub mod function;
/// Dense matrices.
///
/// Defines the `Matrix` type built by `mat<R,C>` and `vec<R>` with cell-wise
/// arithmetic, scaling, the matrix product and the `|`-bracketed grid text
/// form.
pub mod matrix;

pub mod core;
