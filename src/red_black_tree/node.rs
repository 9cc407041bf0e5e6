use crate::arena::Handle;
use serde_derive::{Deserialize, Serialize};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// Links are arena handles. `parent` must point back at the node whose `left` or `right` holds
/// this node's handle.
pub struct Node<T> {
    pub data: T,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(data: T, parent: Option<Handle>) -> Self {
        Node {
            data,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_serde_color() {
        assert_tokens(
            &Color::Black,
            &[Token::UnitVariant {
                name: "Color",
                variant: "Black",
            }],
        );
    }
}
