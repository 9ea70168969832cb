use web_sys::Node;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SafeHtmlProps {
    pub html: String,
}

/// Renders episode descriptions as raw HTML. The markup comes straight from
/// the publishing CMS and is injected without sanitization.
#[function_component(SafeHtml)]
pub fn safe_html(props: &SafeHtmlProps) -> Html {
    let div = gloo_utils::document().create_element("div").unwrap();
    div.set_inner_html(&props.html.clone());

    Html::VRef(Node::from(div))
}
