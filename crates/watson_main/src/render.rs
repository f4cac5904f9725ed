use watson_domain::{
    RuntimeResponseGeneric, RuntimeResponseGenericConnectToAgent, RuntimeResponseGenericSearch,
    SearchResult,
};

/// Renders one `output.generic` item as plain text for the terminal.
pub fn render(item: &RuntimeResponseGeneric) -> String {
    match item {
        RuntimeResponseGeneric::Text(text) => text.text.clone(),
        RuntimeResponseGeneric::Pause(pause) => {
            let typing = if pause.typing.unwrap_or(false) { ", typing" } else { "" };
            format!("[pause {}ms{typing}]", pause.time)
        }
        RuntimeResponseGeneric::Image(image) => {
            let label = image.title.as_deref().or(image.alt_text.as_deref());
            match label {
                Some(label) => format!("[image] {label} <{}>", image.source),
                None => format!("[image] <{}>", image.source),
            }
        }
        RuntimeResponseGeneric::Option(option) => {
            let mut out = option.title.clone();
            for (index, element) in option.options.iter().enumerate() {
                out.push_str(&format!("\n  {}. {}", index + 1, element.label));
            }
            out
        }
        RuntimeResponseGeneric::ConnectToAgent(agent) => render_agent(agent),
        RuntimeResponseGeneric::Suggestion(suggestion) => {
            let mut out = suggestion.title.clone();
            for element in &suggestion.suggestions {
                out.push_str(&format!("\n  - {}", element.label));
            }
            out
        }
        RuntimeResponseGeneric::Search(search) => render_search(search),
    }
}

fn render_agent(agent: &RuntimeResponseGenericConnectToAgent) -> String {
    let mut out = "[transfer to agent]".to_string();
    if let Some(topic) = &agent.topic {
        out.push_str(&format!(" topic: {topic}"));
    }
    if let Some(message) = &agent.message_to_human_agent {
        out.push_str(&format!("\n  note: {message}"));
    }
    out
}

fn render_search(search: &RuntimeResponseGenericSearch) -> String {
    let mut out = search.header.clone();
    let results = search.primary_results.iter().chain(&search.additional_results);
    for (index, result) in results.enumerate() {
        out.push_str(&format!("\n  {}. {}", index + 1, render_result(result)));
    }
    out
}

fn render_result(result: &SearchResult) -> String {
    let title = result.title.as_deref().unwrap_or(&result.id);
    match &result.url {
        Some(url) => format!("{title} <{url}>"),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fixture(value: serde_json::Value) -> RuntimeResponseGeneric {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_text() {
        let fixture = fixture(json!({"response_type": "text", "text": "Hello"}));

        let actual = render(&fixture);

        assert_eq!(actual, "Hello");
    }

    #[test]
    fn test_render_pause() {
        let fixture = fixture(json!({"response_type": "pause", "time": 500, "typing": true}));

        let actual = render(&fixture);

        assert_eq!(actual, "[pause 500ms, typing]");
    }

    #[test]
    fn test_render_image_prefers_title() {
        let fixture = fixture(json!({
            "response_type": "image",
            "source": "https://x/map.png",
            "title": "Map",
            "alt_text": "A map"
        }));

        let actual = render(&fixture);

        assert_eq!(actual, "[image] Map <https://x/map.png>");
    }

    #[test]
    fn test_render_option_numbers_choices() {
        let fixture = fixture(json!({
            "response_type": "option",
            "title": "Pick one",
            "options": [
                {"label": "Red", "value": {"input": {"text": "red"}}},
                {"label": "Blue", "value": {"input": {"text": "blue"}}}
            ]
        }));

        let actual = render(&fixture);

        assert_eq!(actual, "Pick one\n  1. Red\n  2. Blue");
    }

    #[test]
    fn test_render_connect_to_agent() {
        let fixture = fixture(json!({
            "response_type": "connect_to_agent",
            "message_to_human_agent": "Customer wants a refund",
            "topic": "billing"
        }));

        let actual = render(&fixture);

        assert_eq!(actual, "[transfer to agent] topic: billing\n  note: Customer wants a refund");
    }

    #[test]
    fn test_render_suggestion() {
        let fixture = fixture(json!({
            "response_type": "suggestion",
            "title": "Did you mean:",
            "suggestions": [{"label": "Opening hours", "value": {}}]
        }));

        let actual = render(&fixture);

        assert_eq!(actual, "Did you mean:\n  - Opening hours");
    }

    #[test]
    fn test_render_search_lists_primary_then_additional() {
        let fixture = fixture(json!({
            "response_type": "search",
            "header": "I found:",
            "primary_results": [
                {"id": "d-1", "result_metadata": {}, "title": "Hours", "url": "https://x/hours"}
            ],
            "additional_results": [
                {"id": "d-2", "result_metadata": {"score": 0.4}}
            ]
        }));

        let actual = render(&fixture);

        assert_eq!(actual, "I found:\n  1. Hours <https://x/hours>\n  2. d-2");
    }
}
