use std::collections::HashMap;

use crate::{ActorState, Event, EventKind, Graph, GraphNode, NodeKind, Options};

const INDENT: &str = "    ";

/// Lowers a state graph to a single C function built from labels and gotos.
pub struct Compiler<'g> {
    pub graph: &'g Graph,
    pub output: String,
    labels: HashMap<ActorState, usize>,
    tape_len: usize,
}

impl<'g> Compiler<'g> {
    pub fn new(graph: &'g Graph, options: &Options) -> Self {
        let labels = graph
            .states()
            .enumerate()
            .map(|(idx, state)| (*state, idx))
            .collect();
        Self {
            graph,
            output: String::new(),
            labels,
            tape_len: options.tape_len,
        }
    }

    /// Emit the whole program and return its text.
    pub fn compile(mut self) -> String {
        let graph = self.graph;
        self.emit_line(0, "#include <stdio.h>");
        self.emit_line(0, format!("int a[{}];", self.tape_len));
        self.emit_line(0, "int *p = a;");
        self.emit_line(0, "int main() {");
        self.emit_line(1, format!("goto {};", self.label(&graph.initial)));
        for (state, node) in graph.iter() {
            self.emit_line(0, format!("{}:", self.label(state)));
            self.emit_node(node);
        }
        self.emit_line(0, "end:");
        self.emit_line(1, "return 0;");
        self.emit_line(0, "}");
        self.output
    }

    /// Label of a state, `stateN` with N its position in the graph.
    pub fn label(&self, state: &ActorState) -> String {
        format!("state{}", self.labels[state])
    }

    pub(crate) fn emit_line(&mut self, level: usize, line: impl AsRef<str>) {
        for _ in 0..level {
            self.output.push_str(INDENT);
        }
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    fn emit_node(&mut self, node: &GraphNode) {
        match node.kind() {
            NodeKind::Terminal => self.emit_line(1, "goto end;"),
            // Nonzero is the false arm: `[` only skips when the cell is zero
            NodeKind::Branch { on_false, on_true } => {
                debug_assert!(node.events.is_empty(), "branch node carries events");
                self.emit_line(1, format!("if(*p != 0) goto {};", self.label(&on_false)));
                self.emit_line(1, format!("goto {};", self.label(&on_true)));
            }
            NodeKind::Straight(next) => {
                for event in &node.events {
                    self.emit_event(event);
                }
                self.emit_line(1, format!("goto {};", self.label(&next)));
            }
        }
    }

    /// Emit the C statements for one event.
    /// Pointer and arithmetic events fold the repeat into one statement, IO repeats the call.
    pub(crate) fn emit_event(&mut self, event: &Event) {
        let n = event.repeat;
        let line = match event.kind {
            EventKind::Forward => return self.emit_line(1, format!("p += {};", n)),
            EventKind::Back => return self.emit_line(1, format!("p -= {};", n)),
            EventKind::Increment => return self.emit_line(1, format!("*p += {};", n)),
            EventKind::Decrement => return self.emit_line(1, format!("*p -= {};", n)),
            EventKind::OutputChar => "putchar(*p);",
            EventKind::OutputInt => "printf(\"%d \", *p);",
            EventKind::InputChar => "*p = getchar();",
            // Store the parsed value, not scanf's match count
            EventKind::InputInt => "scanf(\"%d\", p);",
        };
        for _ in 0..n {
            self.emit_line(1, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimize, Grid};

    fn compile(source: &str) -> String {
        let options = Options::default();
        let (raw, _) = Graph::build(&Grid::parse(source)).unwrap();
        let graph = optimize(&raw, &options);
        Compiler::new(&graph, &options).compile()
    }

    #[test]
    fn corridor_program() {
        assert_eq!(
            compile("  .\n====="),
            [
                "#include <stdio.h>",
                "int a[1024];",
                "int *p = a;",
                "int main() {",
                "    goto state0;",
                "state0:",
                "    putchar(*p);",
                "    goto state1;",
                "state1:",
                "    goto end;",
                "end:",
                "    return 0;",
                "}",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn branch_polarity() {
        let options = Options::default();
        let (graph, _) = Graph::build(&Grid::parse("+[+:\n====")).unwrap();
        let compiler = Compiler::new(&graph, &options);
        let branch = ActorState::at(1, 0);
        let on_false = compiler.label(&ActorState::at(2, 0));
        let on_true = compiler.label(&ActorState { skip: true, ..ActorState::at(2, 0) });
        let expected = format!(
            "{}:\n    if(*p != 0) goto {};\n    goto {};\n",
            compiler.label(&branch),
            on_false,
            on_true
        );
        assert!(compiler.compile().contains(&expected));
    }

    #[test]
    fn repeats_are_lowered() {
        let options = Options::default();
        let graph = Graph::new(ActorState::initial());
        let mut compiler = Compiler::new(&graph, &options);
        compiler.emit_event(&Event::repeated(EventKind::Increment, 3));
        compiler.emit_event(&Event::repeated(EventKind::Back, 2));
        compiler.emit_event(&Event::repeated(EventKind::OutputInt, 2));
        compiler.emit_event(&Event::new(EventKind::InputInt));
        compiler.emit_event(&Event::new(EventKind::InputChar));
        assert_eq!(
            compiler.output,
            "    *p += 3;\n    p -= 2;\n    printf(\"%d \", *p);\n    printf(\"%d \", *p);\n    scanf(\"%d\", p);\n    *p = getchar();\n"
        );
    }

    #[test]
    fn tape_length_is_configurable() {
        let options = Options {
            tape_len: 30000,
            ..Default::default()
        };
        let (graph, _) = Graph::build(&Grid::parse("=")).unwrap();
        assert!(Compiler::new(&graph, &options).compile().contains("int a[30000];"));
    }

    #[test]
    fn every_state_gets_a_label() {
        let (graph, _) = Graph::build(&Grid::parse("+++    <\n=== ===^\n   >:-[^\n   =====\n")).unwrap();
        let program = Compiler::new(&graph, &Options::default()).compile();
        for idx in 0..graph.len() {
            assert!(program.contains(&format!("\nstate{}:\n", idx)));
        }
        assert!(!program.contains(&format!("state{}:", graph.len())));
    }
}
