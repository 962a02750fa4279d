use std::slice::Iter;

use crate::{error::fileio::*, Graph, MLC_VER};

const MLCGRAPH: &'static str = "MLCGRAPH";
const GRAPHEND: &'static str = "GRAPHEND";

/// Encode a graph as a `.mlg` artifact.
pub fn ser(graph: &Graph) -> FileIOResult<Vec<u8>> {
	let mut output = vec![];
	output.extend(format!("{}\n{}\n", MLCGRAPH, MLC_VER).as_bytes()); // Artifact header
	let payload = bincode::serialize(graph)
		.map_err(|e| FileIOError::ExternalError("bincode::Error".into(), e.to_string()))?;
	output.extend(payload);
	output.extend(format!("\n{}", GRAPHEND).as_bytes()); // Indicate end of the graph
	Ok(output)
}

/// Decode a `.mlg` artifact and check that every edge lands on a node.
pub fn de(input: &[u8]) -> FileIOResult<Graph> {
	let header = format!("{}\n{}\n", MLCGRAPH, MLC_VER);
	consume(&mut input.iter(), &header, MalformedHeaderError::GraphDecl)?;

	let trailer = format!("\n{}", GRAPHEND);
	let body = &input[header.len()..];
	if !body.ends_with(trailer.as_bytes()) {
		return Err(FileIOError::MalformedHeader(MalformedHeaderError::GraphEnd));
	}
	let payload = &body[..body.len() - trailer.len()];

	let mut graph: Graph = bincode::deserialize(payload)
		.map_err(|e| FileIOError::MalformedPayload(e.to_string()))?;
	validate(&graph)?;
	graph.fill_in_predecessors();
	Ok(graph)
}

fn consume(input: &mut Iter<u8>, expected: &str, kind: MalformedHeaderError) -> FileIOResult<()> {
	for i in expected.as_bytes() {
		if input.next() != Some(i) {
			return Err(FileIOError::MalformedHeader(kind))
		}
	}

	Ok(())
}

fn validate(graph: &Graph) -> FileIOResult<()> {
	let malformed = |e| Err(FileIOError::MalformedGraph(e));
	if !graph.contains(&graph.initial) {
		return malformed(MalformedGraphError::MissingInitial(graph.initial));
	}
	for (state, node) in graph.iter() {
		if node.successors.len() > 2 {
			return malformed(MalformedGraphError::TooManySuccessors(*state));
		}
		if let Some(next) = node.successors.iter().find(|next| !graph.contains(next)) {
			return malformed(MalformedGraphError::DanglingSuccessor(*next));
		}
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{optimize, ActorState, Grid, GraphNode, Options};

	fn countdown() -> Graph {
		let (raw, _) = Graph::build(&Grid::parse("+++    <\n=== ===^\n   >:-[^\n   =====\n")).unwrap();
		optimize(&raw, &Options::default())
	}

	#[test]
	fn decode() {
		let graph = countdown();
		let binary = ser(&graph).unwrap();
		assert!(binary.starts_with(b"MLCGRAPH\n"));
		let res = de(&binary);
		assert_eq!(res, Ok(graph));
	}

	#[test]
	fn bad_header() {
		let mut binary = ser(&countdown()).unwrap();
		binary[0] = b'X';
		assert_eq!(de(&binary), Err(FileIOError::MalformedHeader(MalformedHeaderError::GraphDecl)));
		assert_eq!(de(b"MLC"), Err(FileIOError::MalformedHeader(MalformedHeaderError::GraphDecl)));
	}

	#[test]
	fn truncated() {
		let binary = ser(&countdown()).unwrap();
		assert_eq!(
			de(&binary[..binary.len() - 3]),
			Err(FileIOError::MalformedHeader(MalformedHeaderError::GraphEnd))
		);

		let header = format!("{}\n{}\n", MLCGRAPH, MLC_VER);
		let mut cut = header.as_bytes().to_vec();
		cut.extend(&binary[header.len()..header.len() + 4]);
		cut.extend(format!("\n{}", GRAPHEND).as_bytes());
		assert!(matches!(de(&cut), Err(FileIOError::MalformedPayload(_))));
	}

	#[test]
	fn dangling_successor() {
		let mut graph = Graph::new(ActorState::initial());
		graph.insert(ActorState::initial(), GraphNode::new(vec![ActorState::at(9, 9)], vec![]));
		let binary = ser(&graph).unwrap();
		assert_eq!(
			de(&binary),
			Err(FileIOError::MalformedGraph(MalformedGraphError::DanglingSuccessor(ActorState::at(9, 9))))
		);

		let binary = ser(&Graph::new(ActorState::initial())).unwrap();
		assert_eq!(
			de(&binary),
			Err(FileIOError::MalformedGraph(MalformedGraphError::MissingInitial(ActorState::initial())))
		);
	}
}
