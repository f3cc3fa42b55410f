use crate::cards::Card;
use crate::data_models::{Product, Recipe, ResultPayload};
use crate::view::{Element, Node};

pub const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section<'a> {
    Products(&'a [Product]),
    Recipes(&'a [Recipe]),
}

impl Section<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Products(_) => "Products",
            Section::Recipes(_) => "Recipes",
        }
    }

    fn render(&self, full_width: bool) -> Node {
        let mut section = Element::new("div").class("section");
        if full_width {
            section = section.class("full-width");
        }
        let section = section.child(Element::new("h2").text(self.title()));
        let section = match *self {
            Section::Products(items) => section.children(cards(items)),
            Section::Recipes(items) => section.children(cards(items)),
        };
        section.into()
    }
}

fn cards<T: Card>(items: &[T]) -> impl Iterator<Item = Node> + '_ {
    items.iter().map(Card::to_card)
}

/// How the results area is laid out for a given payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout<'a> {
    Empty,
    Single(Section<'a>),
    /// Products always come first.
    Dual {
        products: Section<'a>,
        recipes: Section<'a>,
    },
}

pub fn select_layout(payload: &ResultPayload) -> Layout<'_> {
    match (payload.has_products(), payload.has_recipes()) {
        (false, false) => Layout::Empty,
        (true, false) => Layout::Single(Section::Products(&payload.products)),
        (false, true) => Layout::Single(Section::Recipes(&payload.recipes)),
        (true, true) => Layout::Dual {
            products: Section::Products(&payload.products),
            recipes: Section::Recipes(&payload.recipes),
        },
    }
}

impl Layout<'_> {
    /// Top-level nodes for the results container.
    pub fn render(&self) -> Vec<Node> {
        match self {
            Layout::Empty => vec![Element::new("p").text(NO_RESULTS).into()],
            Layout::Single(section) => vec![section.render(true)],
            Layout::Dual { products, recipes } => {
                vec![products.render(false), recipes.render(false)]
            }
        }
    }
}

pub fn render_results(payload: &ResultPayload) -> Vec<Node> {
    select_layout(payload).render()
}
