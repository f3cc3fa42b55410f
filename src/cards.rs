use crate::data_models::{Product, Recipe};
use crate::view::{Element, Node, safe_url};

/// Anything that can be shown as a result card.
pub trait Card {
    fn to_card(&self) -> Node;
}

impl Card for Product {
    fn to_card(&self) -> Node {
        let body = vec![
            Element::new("p").text(self.description.as_str()).into(),
            Element::new("p")
                .class("price")
                .text(format!("${}", self.price))
                .into(),
        ];
        card(&self.title, body, &self.url, "View Product", &self.images)
    }
}

impl Card for Recipe {
    fn to_card(&self) -> Node {
        let body = vec![Element::new("p").text(self.description.as_str()).into()];
        card(&self.title, body, &self.url, "View Recipe", &self.images())
    }
}

pub fn product_card(product: &Product) -> Node {
    product.to_card()
}

pub fn recipe_card(recipe: &Recipe) -> Node {
    recipe.to_card()
}

fn card(title: &str, body: Vec<Node>, url: &str, link_text: &str, images: &[String]) -> Node {
    let mut card = Element::new("div").class("card");
    if let Some(carousel) = image_carousel(title, images) {
        card = card.child(carousel);
    }
    card.child(Element::new("h3").text(title))
        .children(body)
        .child(
            Element::new("a")
                .attr("href", safe_url(url))
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(link_text),
        )
        .into()
}

/// Builds the carousel fragment, or nothing when there are no usable images.
/// Navigation buttons are only added when there is more than one image.
pub fn image_carousel(title: &str, images: &[String]) -> Option<Node> {
    let images: Vec<&str> = images
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if images.is_empty() {
        return None;
    }

    let mut carousel = Element::new("div").class("image-carousel");
    for (index, src) in images.iter().enumerate() {
        let mut img = Element::new("img")
            .class("card-image")
            .attr("src", safe_url(src))
            .attr("alt", format!("{title} - Image {}", index + 1))
            .attr("data-index", index.to_string());
        if index == 0 {
            img = img.class("active");
        }
        carousel = carousel.child(img);
    }

    if images.len() > 1 {
        carousel = carousel
            .child(
                Element::new("button")
                    .class("carousel-btn")
                    .class("prev")
                    .text("<"),
            )
            .child(
                Element::new("button")
                    .class("carousel-btn")
                    .class("next")
                    .text(">"),
            );
    }
    Some(carousel.into())
}
