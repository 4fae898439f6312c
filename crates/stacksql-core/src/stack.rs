//! The render stack owned by each dialect instance.

use crate::segment::Segment;

/// Last-in-first-out storage for intermediate segments.
///
/// Operators pop their operands and push their result. Popping from an empty
/// stack means the operator sequence was built wrong, which is a bug in the
/// caller and panics.
#[derive(Debug, Default, Clone)]
pub struct RenderStack {
    segments: Vec<Segment>,
}

impl RenderStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns the number of pending segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether no segment is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pushes a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Pushes parameterless SQL text.
    pub fn push_sql(&mut self, sql: impl Into<String>) {
        self.segments.push(Segment::text(sql));
    }

    /// Pops the top segment on behalf of `operator`.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub fn pop(&mut self, operator: &str) -> Segment {
        self.segments
            .pop()
            .unwrap_or_else(|| panic!("render stack underflow in `{operator}`"))
    }

    /// Replaces the top segment with `render(top)`.
    pub fn unary(&mut self, operator: &str, render: impl FnOnce(&Segment) -> String) {
        let value = self.pop(operator);
        let sql = render(&value);
        self.push(Segment::compose(sql, [value]));
    }

    /// Replaces the two top segments with `render(left, right)`.
    ///
    /// `right` is the segment on top of the stack.
    pub fn binary(&mut self, operator: &str, render: impl FnOnce(&Segment, &Segment) -> String) {
        let right = self.pop(operator);
        let left = self.pop(operator);
        let sql = render(&left, &right);
        self.push(Segment::compose(sql, [left, right]));
    }

    /// Replaces the three top segments with `render(first, second, third)`.
    ///
    /// `third` is the segment on top of the stack.
    pub fn ternary(
        &mut self,
        operator: &str,
        render: impl FnOnce(&Segment, &Segment, &Segment) -> String,
    ) {
        let third = self.pop(operator);
        let second = self.pop(operator);
        let first = self.pop(operator);
        let sql = render(&first, &second, &third);
        self.push(Segment::compose(sql, [first, second, third]));
    }

    /// Returns the bottom segment, which holds the statement once rendering is done.
    #[must_use]
    pub fn bottom(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Takes the finished statement.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one segment is pending.
    pub fn finish(&mut self) -> Segment {
        assert!(
            self.segments.len() == 1,
            "render finished with {} pending segments, expected exactly one",
            self.segments.len()
        );
        self.pop("finish")
    }

    /// Drops all pending segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}
