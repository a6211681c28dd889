//! Core scheduling logic.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    api::{CostTable, ExecutionOptions},
    parser::{Ast, Node, NodeId, Operator},
    scheduler::EvalError,
    task::{Task, TaskId, TaskResult},
};

/// One pending step of the post-order walk.
#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    /// Number of operator nodes above this one.
    depth: usize,
    /// Set once both children have been scheduled.
    visited: bool,
}

impl Frame {
    fn enter(id: NodeId, depth: usize) -> Self {
        Self {
            id,
            depth,
            visited: false,
        }
    }
}

/// Walks an [`Ast`] in post-order and turns every operator node into a task.
///
/// At most one task is outstanding at a time: the walk suspends after
/// sending a task until the result with the same id arrives. Resolved values
/// are kept in a side table indexed by [`NodeId`]; the tree itself is never
/// modified.
pub struct Scheduler<'a> {
    options: ExecutionOptions,
    ast: &'a Ast,
    costs: &'a CostTable,
    tasks: &'a mpsc::Sender<Task>,
    results: &'a mut mpsc::Receiver<TaskResult>,
    resolved: Vec<Option<f64>>,
    emitted: Vec<TaskId>,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        options: ExecutionOptions,
        ast: &'a Ast,
        costs: &'a CostTable,
        tasks: &'a mpsc::Sender<Task>,
        results: &'a mut mpsc::Receiver<TaskResult>,
    ) -> Self {
        Self {
            options,
            ast,
            costs,
            tasks,
            results,
            resolved: vec![None; ast.len()],
            emitted: Vec::new(),
        }
    }

    /// Evaluate the whole tree.
    ///
    /// The walk keeps its own stack of frames, so deeply nested input costs
    /// heap rather than call stack.
    pub async fn run(&mut self) -> Result<f64, EvalError> {
        let root = self.ast.root();
        let mut stack = vec![Frame::enter(root, 0)];

        while let Some(frame) = stack.pop() {
            let (op, left, right) = match *self.ast.node(frame.id) {
                Node::Number(_) => continue,
                Node::Binary { op, left, right } => (op, left, right),
            };

            if self.resolved[frame.id.index()].is_some() {
                continue;
            }

            if !frame.visited {
                if frame.depth >= self.options.max_depth {
                    return Err(EvalError::DepthExceeded {
                        depth: frame.depth,
                        max_depth: self.options.max_depth,
                    });
                }
                // Popped in reverse: left subtree, right subtree, then this node.
                stack.push(Frame { visited: true, ..frame });
                stack.push(Frame::enter(right, frame.depth + 1));
                stack.push(Frame::enter(left, frame.depth + 1));
                continue;
            }

            let lhs = self.value_of(left);
            let rhs = self.value_of(right);
            let value = self.dispatch(op, lhs, rhs).await?;
            self.resolved[frame.id.index()] = Some(value);
        }

        Ok(self.value_of(root))
    }

    /// Value computed for an operator node, if the walk reached it.
    pub fn resolved(&self, id: NodeId) -> Option<f64> {
        self.resolved.get(id.index()).copied().flatten()
    }

    /// Ids of the tasks sent so far, in emission order.
    pub fn emitted(&self) -> &[TaskId] {
        &self.emitted
    }

    fn value_of(&self, id: NodeId) -> f64 {
        match *self.ast.node(id) {
            Node::Number(value) => value,
            Node::Binary { .. } => match self.resolved[id.index()] {
                Some(value) => value,
                None => unreachable!("operands resolve before their parent"),
            },
        }
    }

    /// Send one task and wait for its result.
    async fn dispatch(&mut self, op: Operator, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        let task = Task::new(op, lhs, rhs, self.costs.cost_ms(op));
        let task_id = task.id;

        debug!(%task_id, %op, arg1 = lhs, arg2 = rhs, "emitting task");
        self.tasks
            .send(task)
            .await
            .map_err(|_| EvalError::TaskChannelClosed)?;
        self.emitted.push(task_id);

        loop {
            let Some(result) = self.results.recv().await else {
                return Err(EvalError::ResultChannelClosed(task_id));
            };

            // Only one task is outstanding, so anything else is stale.
            if result.task_id != task_id {
                warn!(
                    expected = %task_id,
                    received = %result.task_id,
                    "dropping result for a different task"
                );
                continue;
            }

            debug!(%task_id, value = result.value, error = ?result.error, "task resolved");
            return result
                .into_result()
                .map_err(|source| EvalError::Task { task_id, source });
        }
    }
}
