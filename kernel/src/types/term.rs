//! `Type`: structural type terms.

/// A type term.
///
/// Two types are equal iff they are structurally identical. Element types of
/// lists and tensors take part in equality, so `[int]` and `[float]` never
/// match each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    /// A named base type such as `int` or `f`.
    Atomic(String),
    /// A homogeneous list.
    List(Box<Type>),
    /// A fixed-shape tensor of some element type.
    Tensor { element: Box<Type>, shape: Vec<usize> },
    /// A function type.
    Arrow { inputs: Vec<Type>, output: Box<Type> },
}

impl Type {
    #[must_use]
    pub fn atomic(name: impl Into<String>) -> Self {
        Self::Atomic(name.into())
    }

    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    #[must_use]
    pub fn tensor(element: Type, shape: Vec<usize>) -> Self {
        Self::Tensor {
            element: Box::new(element),
            shape,
        }
    }

    #[must_use]
    pub fn arrow(inputs: Vec<Type>, output: Type) -> Self {
        Self::Arrow {
            inputs,
            output: Box::new(output),
        }
    }

    /// Nesting depth of the term; atoms have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Atomic(_) => 1,
            Self::List(element) | Self::Tensor { element, .. } => 1 + element.depth(),
            Self::Arrow { inputs, output } => {
                1 + inputs
                    .iter()
                    .map(Type::depth)
                    .chain(std::iter::once(output.depth()))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Canonical JSON form, tagged by variant.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Atomic(name) => serde_json::json!({"atomic": name}),
            Self::List(element) => serde_json::json!({"list": element.to_json_value()}),
            Self::Tensor { element, shape } => serde_json::json!({
                "tensor": {"element": element.to_json_value(), "shape": shape},
            }),
            Self::Arrow { inputs, output } => serde_json::json!({
                "arrow": {
                    "inputs": inputs.iter().map(Type::to_json_value).collect::<Vec<_>>(),
                    "output": output.to_json_value(),
                },
            }),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::render::render_type(self))
    }
}
