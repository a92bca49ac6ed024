//! Rewrites a predicate tree into the canonical form the emitter expects:
//! degenerate constant subtrees are folded away, nullable/bitwise operand
//! types are aligned, and shorthand boolean idioms are reduced to a uniform
//! comparison shape. Pure and idempotent; re-applying it to its own output is
//! a no-op.

use crate::compile_error::CompileError;
use crate::expr::{
    BinaryOperator, Expr, MemberAccess, MemberMode, MemberRoot, MethodCall, ScalarKind, SqlValue,
    UnaryOperator,
};

/// Normalize an expression used as a predicate (the top level, or an operand
/// of a logical connective). The result is either a canonical predicate tree
/// or a literal boolean constant.
pub fn normalize(expr: &Expr) -> Result<Expr, CompileError> {
    normalize_predicate(expr)
}

/// Normalize an expression used for its value (an operand of a comparison or
/// arithmetic/bitwise operator, a call argument, or a SET-clause right-hand
/// side).
pub fn normalize_scalar(expr: &Expr) -> Result<Expr, CompileError> {
    normalize_value(expr)
}

fn normalize_predicate(expr: &Expr) -> Result<Expr, CompileError> {
    match expr {
        Expr::Constant(SqlValue::Bool(_)) => Ok(expr.clone()),
        Expr::Constant(_) => Err(CompileError::UnsupportedExpression(
            "non-boolean constant used as a predicate".to_string(),
        )),

        Expr::Member(member) => {
            if let Some(folded) = fold_captured(member)? {
                return normalize_predicate(&folded);
            }
            ensure_flat(member)?;
            match member.mode {
                // a bare presence check reads as "holds a value"
                MemberMode::Presence => Ok(Expr::neq(direct_member(member), Expr::null())),
                MemberMode::Direct | MemberMode::Unwrap if is_bool(member) => {
                    Ok(Expr::eq(direct_member(member), Expr::constant(true)))
                }
                _ => Err(CompileError::UnsupportedExpression(format!(
                    "non-boolean member `{}` used as a predicate",
                    member.display_path()
                ))),
            }
        }

        Expr::Unary(UnaryOperator::Not, inner) => normalize_negation(inner),
        Expr::Unary(UnaryOperator::Convert(_), inner) => normalize_predicate(inner),
        Expr::Unary(UnaryOperator::Negate, _) => Err(CompileError::UnsupportedExpression(
            "arithmetic negation used as a predicate".to_string(),
        )),

        Expr::Binary(BinaryOperator::And, lhs, rhs) => {
            // both operands are visited eagerly: either side may itself fold
            // to a constant
            let lhs = normalize_predicate(lhs)?;
            let rhs = normalize_predicate(rhs)?;
            Ok(fold_and(lhs, rhs))
        }
        Expr::Binary(BinaryOperator::Or, lhs, rhs) => {
            let lhs = normalize_predicate(lhs)?;
            let rhs = normalize_predicate(rhs)?;
            Ok(fold_or(lhs, rhs))
        }

        Expr::Binary(op @ (BinaryOperator::Eq | BinaryOperator::Neq), lhs, rhs) => {
            normalize_equality(*op, lhs, rhs)
        }

        Expr::Binary(
            op @ (BinaryOperator::Lt | BinaryOperator::Lte | BinaryOperator::Gt
            | BinaryOperator::Gte),
            lhs,
            rhs,
        ) => Ok(Expr::binary(
            *op,
            normalize_value(lhs)?,
            normalize_value(rhs)?,
        )),

        Expr::Binary(..) => Err(CompileError::UnsupportedExpression(
            "non-boolean expression used as a predicate".to_string(),
        )),

        Expr::Call(call) => normalize_call(call),
    }
}

fn normalize_value(expr: &Expr) -> Result<Expr, CompileError> {
    match expr {
        Expr::Constant(_) => Ok(expr.clone()),

        Expr::Member(member) => {
            if let Some(folded) = fold_captured(member)? {
                return Ok(folded);
            }
            ensure_flat(member)?;
            match member.mode {
                MemberMode::Direct => Ok(Expr::Member(member.clone())),
                MemberMode::Presence => Ok(Expr::neq(direct_member(member), Expr::null())),
                MemberMode::Unwrap if is_bool(member) => {
                    Ok(Expr::eq(direct_member(member), Expr::constant(true)))
                }
                // the unwrapped value is the member itself, narrowed
                MemberMode::Unwrap => Ok(Expr::convert(
                    member.typ.as_required(),
                    direct_member(member),
                )),
            }
        }

        Expr::Unary(UnaryOperator::Not, _) => normalize_predicate(expr),
        Expr::Unary(UnaryOperator::Negate, inner) => {
            Ok(Expr::negate(normalize_value(inner)?))
        }
        Expr::Unary(UnaryOperator::Convert(typ), inner) => {
            Ok(Expr::convert(*typ, normalize_value(inner)?))
        }

        Expr::Binary(
            BinaryOperator::And
            | BinaryOperator::Or
            | BinaryOperator::Eq
            | BinaryOperator::Neq
            | BinaryOperator::Lt
            | BinaryOperator::Lte
            | BinaryOperator::Gt
            | BinaryOperator::Gte,
            ..,
        ) => normalize_predicate(expr),

        Expr::Binary(
            op @ (BinaryOperator::BitAnd | BinaryOperator::BitOr | BinaryOperator::BitXor),
            lhs,
            rhs,
        ) => {
            let lhs = normalize_value(lhs)?;
            let rhs = normalize_value(rhs)?;
            Ok(align_bitwise_operands(*op, lhs, rhs))
        }

        Expr::Binary(op, lhs, rhs) => Ok(Expr::binary(
            *op,
            normalize_value(lhs)?,
            normalize_value(rhs)?,
        )),

        Expr::Call(call) => normalize_call(call),
    }
}

/// Normalize `Not(inner)`. Double negation and the shorthand rewrites for
/// nullable-presence and bare boolean members match on the raw operand shape;
/// everything else normalizes the operand first and then negates
/// algebraically.
fn normalize_negation(inner: &Expr) -> Result<Expr, CompileError> {
    match inner {
        Expr::Unary(UnaryOperator::Not, inner) => normalize_predicate(inner),
        Expr::Member(member) if member.is_subject() && member.mode == MemberMode::Presence => {
            ensure_flat(member)?;
            Ok(Expr::eq(direct_member(member), Expr::null()))
        }
        Expr::Member(member) if member.is_subject() && is_bool(member) => {
            ensure_flat(member)?;
            Ok(Expr::eq(direct_member(member), Expr::constant(false)))
        }
        _ => Ok(negate(normalize_predicate(inner)?)),
    }
}

/// Algebraic negation of a normalized predicate. `Lte`/`Gte` (and the logical
/// connectives) keep a generic `Not` wrapper.
fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(SqlValue::Bool(b)) => Expr::constant(!b),
        Expr::Binary(BinaryOperator::Eq, lhs, rhs) => Expr::Binary(BinaryOperator::Neq, lhs, rhs),
        Expr::Binary(BinaryOperator::Neq, lhs, rhs) => Expr::Binary(BinaryOperator::Eq, lhs, rhs),
        Expr::Binary(BinaryOperator::Lt, lhs, rhs) => Expr::Binary(BinaryOperator::Gte, lhs, rhs),
        Expr::Binary(BinaryOperator::Gt, lhs, rhs) => Expr::Binary(BinaryOperator::Lte, lhs, rhs),
        Expr::Unary(UnaryOperator::Not, inner) => *inner,
        other => Expr::not(other),
    }
}

fn fold_and(lhs: Expr, rhs: Expr) -> Expr {
    match (lhs.as_literal_bool(), rhs.as_literal_bool()) {
        (Some(false), _) | (_, Some(false)) => Expr::constant(false),
        (Some(true), _) => rhs,
        (_, Some(true)) => lhs,
        _ => Expr::and(lhs, rhs),
    }
}

fn fold_or(lhs: Expr, rhs: Expr) -> Expr {
    match (lhs.as_literal_bool(), rhs.as_literal_bool()) {
        (Some(true), _) | (_, Some(true)) => Expr::constant(true),
        (Some(false), _) => rhs,
        (_, Some(false)) => lhs,
        _ => Expr::or(lhs, rhs),
    }
}

fn normalize_equality(
    op: BinaryOperator,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<Expr, CompileError> {
    let lhs = normalize_value(lhs)?;
    let rhs = normalize_value(rhs)?;

    // two compile-time constants fold to a literal boolean
    if let (Expr::Constant(a), Expr::Constant(b)) = (&lhs, &rhs) {
        let equal = a == b;
        return Ok(Expr::constant(if op == BinaryOperator::Eq {
            equal
        } else {
            !equal
        }));
    }

    // a single constant operand is canonicalized to the right-hand side
    let (lhs, rhs) =
        if matches!(lhs, Expr::Constant(_)) && !matches!(rhs, Expr::Constant(_)) {
            (rhs, lhs)
        } else {
            (lhs, rhs)
        };

    // a trailing boolean comparison against a predicate collapses to the
    // predicate itself (or its negation); a comparison against a bare member
    // is already canonical
    if is_predicate_shaped(&lhs) {
        if let Expr::Constant(SqlValue::Bool(b)) = rhs {
            let keep = if op == BinaryOperator::Eq { b } else { !b };
            return Ok(if keep { lhs } else { negate(lhs) });
        }
    }

    Ok(Expr::binary(op, lhs, rhs))
}

/// Insert an explicit narrowing conversion so both bitwise operands share the
/// same type. Never fires for the logical connectives.
fn align_bitwise_operands(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Expr {
    match (lhs.static_type(), rhs.static_type()) {
        (Some(l), Some(r)) if l.kind == r.kind && l.nullable && !r.nullable => {
            let target = l.as_required();
            Expr::binary(op, Expr::convert(target, lhs), rhs)
        }
        (Some(l), Some(r)) if l.kind == r.kind && !l.nullable && r.nullable => {
            let target = r.as_required();
            Expr::binary(op, lhs, Expr::convert(target, rhs))
        }
        _ => Expr::binary(op, lhs, rhs),
    }
}

fn normalize_call(call: &MethodCall) -> Result<Expr, CompileError> {
    let member = canonical_call_member(call.member())?;
    match call {
        MethodCall::Contains(_, arg) => Ok(Expr::Call(MethodCall::Contains(
            member,
            Box::new(normalize_value(arg)?),
        ))),
        MethodCall::StartsWith(_, arg) => Ok(Expr::Call(MethodCall::StartsWith(
            member,
            Box::new(normalize_value(arg)?),
        ))),
        MethodCall::EndsWith(_, arg) => Ok(Expr::Call(MethodCall::EndsWith(
            member,
            Box::new(normalize_value(arg)?),
        ))),
        MethodCall::InList(_, values) => {
            if values.is_empty() {
                // no value can match: the whole fragment is constant false
                Ok(Expr::constant(false))
            } else {
                Ok(Expr::Call(MethodCall::InList(member, values.clone())))
            }
        }
    }
}

/// A call target must be a flat subject property; an `Unwrap` access reads as
/// the property itself.
fn canonical_call_member(member: &MemberAccess) -> Result<MemberAccess, CompileError> {
    if !member.is_subject() {
        return Err(CompileError::UnsupportedExpression(format!(
            "`{}` is not a property of the subject row",
            member.display_path()
        )));
    }
    ensure_flat(member)?;
    match member.mode {
        MemberMode::Direct | MemberMode::Unwrap => Ok(member.as_direct()),
        MemberMode::Presence => Err(CompileError::UnsupportedExpression(format!(
            "presence check on `{}` cannot be a call target",
            member.display_path()
        ))),
    }
}

/// Fold a member chain rooted in a compile-time constant to a literal. `None`
/// for subject-rooted members.
fn fold_captured(member: &MemberAccess) -> Result<Option<Expr>, CompileError> {
    match &member.root {
        MemberRoot::Subject => Ok(None),
        MemberRoot::Captured(root) => {
            let value = root.resolve(&member.path)?;
            let value = match member.mode {
                MemberMode::Direct | MemberMode::Unwrap => value,
                MemberMode::Presence => SqlValue::Bool(!value.is_null()),
            };
            Ok(Some(Expr::Constant(value)))
        }
    }
}

fn ensure_flat(member: &MemberAccess) -> Result<(), CompileError> {
    member.single_property().map(|_| ())
}

fn direct_member(member: &MemberAccess) -> Expr {
    Expr::Member(member.as_direct())
}

fn is_bool(member: &MemberAccess) -> bool {
    member.typ.kind == ScalarKind::Bool
}

fn is_predicate_shaped(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Binary(
            BinaryOperator::And
                | BinaryOperator::Or
                | BinaryOperator::Eq
                | BinaryOperator::Neq
                | BinaryOperator::Lt
                | BinaryOperator::Lte
                | BinaryOperator::Gt
                | BinaryOperator::Gte,
            ..
        ) | Expr::Unary(UnaryOperator::Not, _)
            | Expr::Call(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{CapturedValue, ExprType};

    fn int_member(name: &str) -> Expr {
        Expr::member(MemberAccess::subject(name, ExprType::of(ScalarKind::Int)))
    }

    fn bool_member(name: &str) -> Expr {
        Expr::member(MemberAccess::subject(name, ExprType::of(ScalarKind::Bool)))
    }

    fn nullable_int(name: &str) -> MemberAccess {
        MemberAccess::subject(name, ExprType::nullable(ScalarKind::Int))
    }

    fn age_over_18() -> Expr {
        Expr::gt(int_member("Age"), Expr::constant(18))
    }

    #[test]
    fn double_negation_vanishes() {
        let expr = Expr::not(Expr::not(age_over_18()));
        assert_eq!(normalize(&expr).unwrap(), normalize(&age_over_18()).unwrap());
    }

    #[test]
    fn negated_presence_check_becomes_a_null_comparison() {
        let expr = Expr::not(Expr::member(MemberAccess::presence(
            "Score",
            ExprType::nullable(ScalarKind::Int),
        )));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::eq(Expr::member(nullable_int("Score")), Expr::null())
        );
    }

    #[test]
    fn bare_presence_check_becomes_a_not_null_comparison() {
        let expr = Expr::member(MemberAccess::presence(
            "Score",
            ExprType::nullable(ScalarKind::Int),
        ));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::neq(Expr::member(nullable_int("Score")), Expr::null())
        );
    }

    #[test]
    fn negated_bare_boolean_member_compares_against_false() {
        let expr = Expr::not(bool_member("IsActive"));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::eq(bool_member("IsActive"), Expr::constant(false))
        );
    }

    #[test]
    fn bare_boolean_member_compares_against_true() {
        let expr = bool_member("IsActive");
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::eq(bool_member("IsActive"), Expr::constant(true))
        );
    }

    #[test]
    fn negated_comparisons_flip_algebraically() {
        let a = || int_member("A");
        let b = || Expr::constant(1);

        assert_eq!(
            normalize(&Expr::not(Expr::eq(a(), b()))).unwrap(),
            Expr::neq(a(), b())
        );
        assert_eq!(
            normalize(&Expr::not(Expr::neq(a(), b()))).unwrap(),
            Expr::eq(a(), b())
        );
        assert_eq!(
            normalize(&Expr::not(Expr::lt(a(), b()))).unwrap(),
            Expr::gte(a(), b())
        );
        assert_eq!(
            normalize(&Expr::not(Expr::gt(a(), b()))).unwrap(),
            Expr::lte(a(), b())
        );
    }

    #[test]
    fn negated_lte_and_gte_keep_a_not_wrapper() {
        let expr = Expr::not(Expr::lte(int_member("A"), Expr::constant(1)));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::not(Expr::lte(int_member("A"), Expr::constant(1)))
        );

        let expr = Expr::not(Expr::gte(int_member("A"), Expr::constant(1)));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::not(Expr::gte(int_member("A"), Expr::constant(1)))
        );
    }

    #[test]
    fn and_or_fold_constant_operands() {
        let live = age_over_18();
        let live_n = normalize(&live).unwrap();

        assert_eq!(
            normalize(&Expr::and(Expr::constant(false), live.clone())).unwrap(),
            Expr::constant(false)
        );
        assert_eq!(
            normalize(&Expr::and(live.clone(), Expr::constant(false))).unwrap(),
            Expr::constant(false)
        );
        assert_eq!(
            normalize(&Expr::and(Expr::constant(true), live.clone())).unwrap(),
            live_n
        );
        assert_eq!(
            normalize(&Expr::or(Expr::constant(true), live.clone())).unwrap(),
            Expr::constant(true)
        );
        assert_eq!(
            normalize(&Expr::or(live.clone(), Expr::constant(false))).unwrap(),
            live_n
        );
        assert_eq!(
            normalize(&Expr::and(Expr::constant(true), Expr::constant(true))).unwrap(),
            Expr::constant(true)
        );
    }

    #[test]
    fn constant_operand_moves_to_the_right() {
        let expr = Expr::eq(Expr::constant(18), int_member("Age"));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::eq(int_member("Age"), Expr::constant(18))
        );
    }

    #[test]
    fn two_constant_operands_fold() {
        assert_eq!(
            normalize(&Expr::eq(Expr::constant(1), Expr::constant(1))).unwrap(),
            Expr::constant(true)
        );
        assert_eq!(
            normalize(&Expr::neq(Expr::constant(1), Expr::constant(2))).unwrap(),
            Expr::constant(true)
        );
        assert_eq!(
            normalize(&Expr::eq(Expr::null(), Expr::null())).unwrap(),
            Expr::constant(true)
        );
    }

    #[test]
    fn trailing_boolean_comparison_against_a_predicate_collapses() {
        let pred = age_over_18();
        let pred_n = normalize(&pred).unwrap();

        assert_eq!(
            normalize(&Expr::eq(pred.clone(), Expr::constant(true))).unwrap(),
            pred_n
        );
        assert_eq!(
            normalize(&Expr::eq(pred.clone(), Expr::constant(false))).unwrap(),
            Expr::lte(int_member("Age"), Expr::constant(18))
        );
        assert_eq!(
            normalize(&Expr::neq(pred.clone(), Expr::constant(true))).unwrap(),
            Expr::lte(int_member("Age"), Expr::constant(18))
        );
        assert_eq!(
            normalize(&Expr::neq(pred, Expr::constant(false))).unwrap(),
            pred_n
        );
    }

    #[test]
    fn boolean_comparison_against_a_bare_member_is_already_canonical() {
        let expr = Expr::eq(bool_member("IsActive"), Expr::constant(true));
        assert_eq!(normalize(&expr).unwrap(), expr);
    }

    #[test]
    fn bitwise_operands_get_a_narrowing_conversion() {
        let flags = Expr::member(nullable_int("Flags"));
        let expr = Expr::eq(
            Expr::binary(BinaryOperator::BitAnd, flags.clone(), Expr::constant(4)),
            Expr::constant(4),
        );

        let aligned = Expr::binary(
            BinaryOperator::BitAnd,
            Expr::convert(ExprType::of(ScalarKind::Int), flags),
            Expr::constant(4),
        );
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::eq(aligned, Expr::constant(4))
        );
    }

    #[test]
    fn logical_connectives_never_get_conversions() {
        let lhs = bool_member("A");
        let rhs = bool_member("B");
        let expr = Expr::and(lhs.clone(), rhs.clone());

        let expected = Expr::and(
            Expr::eq(lhs, Expr::constant(true)),
            Expr::eq(rhs, Expr::constant(true)),
        );
        assert_eq!(normalize(&expr).unwrap(), expected);
    }

    #[test]
    fn unwrap_of_a_nullable_member_carries_a_conversion_marker() {
        let member = MemberAccess::unwrapped("Score", ExprType::nullable(ScalarKind::Int));
        let expr = Expr::gt(Expr::member(member), Expr::constant(10));

        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::gt(
                Expr::convert(
                    ExprType::of(ScalarKind::Int),
                    Expr::member(nullable_int("Score"))
                ),
                Expr::constant(10)
            )
        );
    }

    #[test]
    fn unwrap_of_a_nullable_boolean_uses_the_boolean_shorthand() {
        let member = MemberAccess::unwrapped("IsActive", ExprType::nullable(ScalarKind::Bool));
        let expected = Expr::eq(
            Expr::member(MemberAccess::subject(
                "IsActive",
                ExprType::nullable(ScalarKind::Bool),
            )),
            Expr::constant(true),
        );
        assert_eq!(normalize(&Expr::member(member)).unwrap(), expected);
    }

    #[test]
    fn captured_chains_fold_to_literals() {
        let env = CapturedValue::composite([(
            "filter",
            CapturedValue::composite([("min_age", CapturedValue::scalar(21))]),
        )]);
        let member = MemberAccess::captured(
            env,
            vec!["filter".to_string(), "min_age".to_string()],
            ExprType::of(ScalarKind::Int),
        );

        let expr = Expr::gt(int_member("Age"), Expr::member(member));
        assert_eq!(
            normalize(&expr).unwrap(),
            Expr::gt(int_member("Age"), Expr::constant(21))
        );
    }

    #[test]
    fn captured_chain_that_is_not_a_scalar_fails() {
        let env = CapturedValue::composite([(
            "filter",
            CapturedValue::composite::<[(&str, CapturedValue); 0], &str>([]),
        )]);
        let member = MemberAccess::captured(
            env,
            vec!["filter".to_string()],
            ExprType::of(ScalarKind::Int),
        );
        let expr = Expr::gt(int_member("Age"), Expr::member(member));
        assert!(matches!(
            normalize(&expr),
            Err(CompileError::InvalidConstant(_))
        ));
    }

    #[test]
    fn deep_subject_chains_are_rejected() {
        let deep = MemberAccess {
            root: MemberRoot::Subject,
            path: vec!["Address".to_string(), "City".to_string()],
            typ: ExprType::of(ScalarKind::Text),
            mode: MemberMode::Direct,
        };
        let expr = Expr::eq(Expr::member(deep), Expr::constant("Oslo"));
        assert!(matches!(
            normalize(&expr),
            Err(CompileError::UnresolvedMember(_))
        ));
    }

    #[test]
    fn empty_in_list_folds_the_surrounding_fragment() {
        let in_list = Expr::Call(MethodCall::InList(
            MemberAccess::subject("Id", ExprType::of(ScalarKind::Int)),
            vec![],
        ));
        let expr = Expr::and(age_over_18(), in_list);
        assert_eq!(normalize(&expr).unwrap(), Expr::constant(false));
    }

    #[test]
    fn normalization_is_idempotent() {
        let env = CapturedValue::composite([("min", CapturedValue::scalar(3))]);
        let samples = vec![
            age_over_18(),
            Expr::not(Expr::not(age_over_18())),
            Expr::not(bool_member("IsActive")),
            bool_member("IsActive"),
            Expr::member(MemberAccess::presence(
                "Score",
                ExprType::nullable(ScalarKind::Int),
            )),
            Expr::not(Expr::member(MemberAccess::presence(
                "Score",
                ExprType::nullable(ScalarKind::Int),
            ))),
            Expr::not(Expr::lte(int_member("A"), Expr::constant(1))),
            Expr::and(age_over_18(), Expr::constant(true)),
            Expr::or(age_over_18(), bool_member("IsActive")),
            Expr::eq(Expr::constant(5), int_member("Age")),
            Expr::eq(age_over_18(), Expr::constant(false)),
            Expr::binary(
                BinaryOperator::BitAnd,
                Expr::member(nullable_int("Flags")),
                Expr::constant(4),
            ),
            Expr::member(MemberAccess::unwrapped(
                "Score",
                ExprType::nullable(ScalarKind::Int),
            )),
            Expr::Call(MethodCall::Contains(
                MemberAccess::subject("Name", ExprType::of(ScalarKind::Text)),
                Box::new(Expr::constant("Jo")),
            )),
            Expr::Call(MethodCall::InList(
                MemberAccess::subject("Id", ExprType::of(ScalarKind::Int)),
                vec![SqlValue::Int32(1), SqlValue::Int32(1)],
            )),
            Expr::gt(
                int_member("Age"),
                Expr::member(MemberAccess::captured(
                    env,
                    vec!["min".to_string()],
                    ExprType::of(ScalarKind::Int),
                )),
            ),
        ];

        for expr in samples {
            let once = normalize_any(&expr);
            let twice = normalize_any(&once);
            assert_eq!(once, twice, "not idempotent for {expr:?}");
        }
    }

    /// Value-shaped samples are not predicates; normalize them in the context
    /// that accepts them.
    fn normalize_any(expr: &Expr) -> Expr {
        normalize(expr)
            .or_else(|_| normalize_scalar(expr))
            .unwrap()
    }
}
