use std::fmt::Display;

use itertools::Itertools;

use crate::{Automaton, Edge, StateIndex};

/// Implemented by objects that can be turned into a graph description in the DOT language,
/// for more information on the format, see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
pub trait Dottable {
    /// Name of the produced graph.
    fn dot_name(&self) -> String;

    /// Statements for the nodes of the graph, one per line.
    fn dot_states(&self) -> Vec<String>;

    /// Statements for the edges of the graph, one per line.
    fn dot_transitions(&self) -> Vec<String>;

    /// Compute the graphviz representation.
    fn dot_representation(&self) -> String {
        std::iter::once(format!("digraph {} {{", self.dot_name()))
            .chain(self.dot_states())
            .chain(self.dot_transitions())
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Renders the object visually (as PNG) and returns a vec of bytes/u8s encoding
    /// the rendered image. This method is only available on the `graphviz` crate feature
    /// and requires the `dot` executable to be installed.
    #[cfg(feature = "graphviz")]
    fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        use std::{io::Write, process::Stdio};
        use tracing::trace;

        let dot = self.dot_representation();
        trace!("rendering dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!("could not render, dot reported\n{stderr}");
            return Err(std::io::Error::other(format!(
                "dot process exited with status {}",
                output.status
            )));
        }
        Ok(output.stdout)
    }

    /// Attempts to render the object to a PNG file with the given filename. This method
    /// is only available on the `graphviz` crate feature and makes use of temporary files.
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &str) -> Result<(), std::io::Error> {
        use std::io::Write;
        use tracing::trace;

        trace!("writing dot representation to temporary file and rendering to {filename}");
        let mut tempfile = tempfile::NamedTempFile::new()?;
        tempfile.write_all(self.dot_representation().as_bytes())?;

        let status = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(tempfile.path())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "dot process exited with status {status}"
            )))
        }
    }
}

/// Attributes of a node in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The color of a node
    Color(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
            DotStateAttribute::Color(c) => write!(f, "color=\"{c}\""),
        }
    }
}

fn dot_state_ident(idx: StateIndex) -> String {
    format!("q{idx}")
}

impl Automaton {
    fn dot_state_attributes(&self, idx: StateIndex) -> Vec<DotStateAttribute> {
        let Some(state) = self.state(idx) else {
            return vec![];
        };
        let shape = if state.is_accepting() {
            "doublecircle"
        } else {
            "circle"
        };
        let mut attributes = vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(dot_state_ident(idx)),
        ];
        if state.is_initial() {
            attributes.push(DotStateAttribute::Color("green".into()));
        }
        attributes
    }

    fn dot_transition(&self, edge: &Edge) -> String {
        format!(
            "{} -> {} [label=\"{}\"]",
            dot_state_ident(edge.source()),
            dot_state_ident(edge.target()),
            edge.show_label()
        )
    }
}

impl Dottable for Automaton {
    fn dot_name(&self) -> String {
        "RPNI".into()
    }

    fn dot_states(&self) -> Vec<String> {
        self.state_indices()
            .map(|q| {
                format!(
                    "{} [{}]",
                    dot_state_ident(q),
                    self.dot_state_attributes(q).iter().join(", ")
                )
            })
            .collect()
    }

    fn dot_transitions(&self) -> Vec<String> {
        self.edges().iter().map(|e| self.dot_transition(e)).collect()
    }
}
