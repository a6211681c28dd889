//! Compile and evaluate random expression trees against a direct evaluator.

use proptest::prelude::*;
use tokio::sync::mpsc;

use crate::api::CostTable;
use crate::parser::{Operator, parse};
use crate::scheduler::{self, EvalError};
use crate::task::{Task, TaskError, TaskResult};

#[derive(Debug, Clone)]
enum Expr {
    Num(u32),
    Bin(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self) -> Result<f64, TaskError> {
        match self {
            Expr::Num(n) => Ok(f64::from(*n)),
            Expr::Bin(op, left, right) => {
                let a = left.eval()?;
                let b = right.eval()?;
                if *op == Operator::Div && b == 0.0 {
                    return Err(TaskError::DivisionByZero);
                }
                Ok(op.apply(a, b))
            }
        }
    }

    fn operators(&self) -> usize {
        match self {
            Expr::Num(_) => 0,
            Expr::Bin(_, left, right) => 1 + left.operators() + right.operators(),
        }
    }

    /// Every binary node wrapped in parentheses.
    fn full(&self) -> String {
        match self {
            Expr::Num(n) => n.to_string(),
            Expr::Bin(op, left, right) => format!("({} {} {})", left.full(), op, right.full()),
        }
    }

    /// Only the parentheses precedence and left associativity require.
    fn minimal(&self) -> String {
        match self {
            Expr::Num(n) => n.to_string(),
            Expr::Bin(op, left, right) => {
                let wrap = |child: &Expr, needs: fn(u8, u8) -> bool| match child {
                    Expr::Bin(inner, ..) if needs(inner.precedence(), op.precedence()) => {
                        format!("({})", child.minimal())
                    }
                    _ => child.minimal(),
                };
                format!(
                    "{}{}{}",
                    wrap(left, |inner, outer| inner < outer),
                    op,
                    wrap(right, |inner, outer| inner <= outer),
                )
            }
        }
    }
}

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = (0u32..100).prop_map(Expr::Num);
    leaf.prop_recursive(6, 48, 2, |inner| {
        (
            prop::sample::select(Operator::ALL.to_vec()),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, left, right)| Expr::Bin(op, Box::new(left), Box::new(right)))
    })
}

/// Evaluate through the scheduler with an in-process responder.
fn distributed(source: &str) -> (Result<f64, EvalError>, usize) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let ast = parse(source).unwrap();
        let (task_tx, mut task_rx) = mpsc::channel::<Task>(1);
        let (result_tx, mut result_rx) = mpsc::channel::<TaskResult>(1);

        let worker = tokio::spawn(async move {
            let mut count = 0;
            while let Some(task) = task_rx.recv().await {
                count += 1;
                let result = match task.error.clone() {
                    Some(error) => TaskResult::failed(task.id, error),
                    None => {
                        let op = task.operator().unwrap();
                        TaskResult::ok(task.id, op.apply(task.arg1, task.arg2))
                    }
                };
                if result_tx.send(result).await.is_err() {
                    break;
                }
            }
            count
        });

        let value = scheduler::evaluate(&ast, &CostTable::default(), &task_tx, &mut result_rx).await;
        drop(task_tx);
        (value, worker.await.unwrap())
    })
}

proptest! {
    #[test]
    fn matches_direct_evaluation(e in expr()) {
        let (value, tasks) = distributed(&e.full());
        match e.eval() {
            Ok(expected) => {
                prop_assert_eq!(value.unwrap().to_bits(), expected.to_bits());
                prop_assert_eq!(tasks, e.operators());
            }
            Err(expected) => {
                let error = value.unwrap_err();
                prop_assert_eq!(error.task_error(), Some(&expected));
                prop_assert!(tasks <= e.operators());
            }
        }
    }

    #[test]
    fn precedence_recovers_tree_shape(e in expr()) {
        let ast = parse(&e.minimal()).unwrap();
        prop_assert_eq!(ast.to_string(), e.full());
        prop_assert_eq!(ast.operator_count(), e.operators());
    }
}
