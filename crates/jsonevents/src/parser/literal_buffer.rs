use crate::path::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Literal::Null => b"null",
            Literal::True => b"true",
            Literal::False => b"false",
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Literal::Null => NodeKind::Null,
            Literal::True | Literal::False => NodeKind::Bool,
        }
    }
}

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Literal),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, literal)` while matching
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], Literal)>);

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* byte (`n`, `t`, or `f`)
    pub fn new(first: u8) -> Self {
        match first {
            b'n' => ExpectedLiteralBuffer(Some((b"ull", Literal::Null))),
            b't' => ExpectedLiteralBuffer(Some((b"rue", Literal::True))),
            b'f' => ExpectedLiteralBuffer(Some((b"alse", Literal::False))),
            _ => ExpectedLiteralBuffer(None),
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub fn step(&mut self, b: u8) -> Step {
        let Some((bytes, literal)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((&expected, rest)) if expected == b => {
                if rest.is_empty() {
                    Step::Done(literal)
                } else {
                    self.0 = Some((rest, literal));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch – restore the state we took at the top
                self.0 = Some((bytes, literal));
                Step::Reject
            }
        }
    }
}
