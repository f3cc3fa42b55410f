use nanoid::nanoid;
use std::str::FromStr;

use crate::view::{Element, Node};

pub const CAROUSEL_ID_ATTR: &str = "data-carousel-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prev" | "previous" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Index of the visible image for one carousel. Starts at 0, wraps both ways.
/// Always holds at least one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// `None` for an empty image set.
    pub fn new(len: usize) -> Option<Carousel> {
        (len > 0).then_some(Carousel { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.len
    }

    pub fn step(&mut self, direction: Direction) -> usize {
        self.index = match direction {
            Direction::Next => (self.index + 1) % self.len,
            Direction::Prev => (self.index + self.len - 1) % self.len,
        };
        self.index
    }
}

/// Navigation state for every multi-image carousel currently in the results.
///
/// Built from freshly inserted nodes with [`CarouselController::attach`] and
/// thrown away with them on the next render.
#[derive(Debug, Default)]
pub struct CarouselController {
    carousels: Vec<(String, Carousel)>,
}

impl CarouselController {
    pub fn attach(nodes: &mut [Node]) -> CarouselController {
        let mut carousels = Vec::new();
        for el in nodes.iter_mut().filter_map(Node::as_element_mut) {
            el.walk_mut(&mut |el: &mut Element| {
                if !el.has_class("image-carousel") {
                    return;
                }
                let count = card_images(el).count();
                // single images get no controls
                if let Some(carousel) = Carousel::new(count).filter(|c| c.image_count() > 1) {
                    let id = nanoid!(10);
                    el.set_attr(CAROUSEL_ID_ATTR, id.clone());
                    carousels.push((id, carousel));
                }
            });
        }
        tracing::debug!("attached {} carousels", carousels.len());
        CarouselController { carousels }
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.carousels.iter().map(|(id, _)| id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&Carousel> {
        self.carousels
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, c)| c)
    }

    /// Moves carousel `id` one step and marks the new image active in `nodes`.
    pub fn navigate(&mut self, nodes: &mut [Node], id: &str, direction: Direction) -> Option<usize> {
        let carousel = self
            .carousels
            .iter_mut()
            .find(|(cid, _)| cid == id)
            .map(|(_, c)| c)?;
        let index = carousel.step(direction);

        for el in nodes.iter_mut().filter_map(Node::as_element_mut) {
            el.walk_mut(&mut |el: &mut Element| {
                if el.get_attr(CAROUSEL_ID_ATTR) == Some(id) {
                    show_image(el, index);
                }
            });
        }
        Some(index)
    }
}

fn card_images(carousel: &Element) -> impl Iterator<Item = &Element> {
    carousel
        .child_elements()
        .filter(|el| el.has_class("card-image"))
}

fn show_image(carousel: &mut Element, index: usize) {
    for (i, img) in carousel
        .child_elements_mut()
        .filter(|el| el.has_class("card-image"))
        .enumerate()
    {
        if i == index {
            img.add_class("active");
        } else {
            img.remove_class("active");
        }
    }
}

#[test]
fn test_step_wraps_both_ways() {
    let mut carousel = Carousel::new(3).unwrap();
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.step(Direction::Prev), 2);
    assert_eq!(carousel.step(Direction::Next), 0);
    assert_eq!(carousel.step(Direction::Next), 1);
}

#[test]
fn test_empty_carousel_is_rejected() {
    assert!(Carousel::new(0).is_none());
    assert_eq!(Carousel::new(1).unwrap().image_count(), 1);
}
