use mealmate_domain::EventDocument;

/// Joins retrieved document contents into one newline-separated history
/// block, preserving relevance order. No documents means no context, which
/// is not an error.
pub fn aggregate(docs: &[EventDocument]) -> Option<String> {
	if docs.is_empty() {
		return None;
	}

	Some(docs.iter().map(|doc| doc.content.as_str()).collect::<Vec<_>>().join("\n"))
}
