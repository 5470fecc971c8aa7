//! Formula evaluator
//!
//! Evaluates formula ASTs against caller-supplied variable bindings.
//! Evaluation never mutates the tree or the bindings.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{EvalError, EvalResult};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Source of variable values during evaluation
pub trait Bindings {
    /// Value bound to `name`, if any
    fn get_value(&self, name: &str) -> Option<f32>;
}

impl<K, S> Bindings for HashMap<K, f32, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn get_value(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

impl<K> Bindings for BTreeMap<K, f32>
where
    K: Borrow<str> + Ord,
{
    fn get_value(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

impl<K> Bindings for ahash::AHashMap<K, f32>
where
    K: Borrow<str> + Hash + Eq,
{
    fn get_value(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn get_value(&self, name: &str) -> Option<f32> {
        (**self).get_value(name)
    }
}

/// Evaluate a formula expression
///
/// Missing variables are only discovered when the walk reaches them; the
/// left operand of a binary node is fully evaluated before the right one.
pub fn evaluate<B: Bindings + ?Sized>(expr: &Expr, bindings: &B) -> EvalResult<f32> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Variable(name) => bindings
            .get_value(name)
            .ok_or_else(|| EvalError::MissingVariable(name.clone())),

        Expr::Unary { op, operand } => {
            let value = evaluate(operand, bindings)?;
            Ok(evaluate_unary_op(*op, value))
        }

        Expr::Binary { op, left, right } => {
            let left = evaluate(left, bindings)?;
            let right = evaluate(right, bindings)?;
            Ok(evaluate_binary_op(*op, left, right))
        }
    }
}

fn evaluate_unary_op(op: UnaryOperator, value: f32) -> f32 {
    match op {
        UnaryOperator::Negate => -value,
    }
}

/// Division by zero yields zero rather than an infinity or NaN
fn evaluate_binary_op(op: BinaryOperator, left: f32, right: f32) -> f32 {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right == 0.0 {
                0.0
            } else {
                left / right
            }
        }
    }
}
