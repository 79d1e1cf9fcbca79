//! Shared component resolution.
//!
//! A content item of type `component` points at a [`Component`] by id. The
//! map is built once per compilation pass and only read afterwards, so every
//! placement of the same id resolves to the same content.

use crate::model::{
    Component, ContentItem, ContentKind, ContentPayload, Frame, GridArea, NamedPosition, Style,
};
use std::collections::HashMap;
use std::fmt;

/// Lookup table from component id to definition.
#[derive(Debug, Clone, Default)]
pub struct ComponentMap<'a> {
    by_id: HashMap<&'a str, &'a Component>,
}

impl<'a> ComponentMap<'a> {
    /// Build the map. When ids repeat, the last definition wins.
    pub fn new(components: &'a [Component]) -> Self {
        let mut by_id = HashMap::with_capacity(components.len());
        for component in components {
            if by_id.insert(component.id.as_str(), component).is_some() {
                log::debug!(
                    "Duplicate component id '{}', keeping the last definition",
                    component.id
                );
            }
        }
        Self { by_id }
    }

    /// Get a component by id.
    pub fn get(&self, id: &str) -> Option<&'a Component> {
        self.by_id.get(id).copied()
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if no components are defined.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Resolve an item into concrete kind, payload and style.
    ///
    /// Inline items pass through unchanged. Component references take the
    /// component's kind and payload; the item's style overrides the
    /// component's style key by key, and placement hints stay with the item.
    pub fn resolve<'i>(&self, item: &'i ContentItem) -> Result<ResolvedItem<'i>, ComponentMiss>
    where
        'a: 'i,
    {
        let item_style = item.style.clone().unwrap_or_default();

        if item.kind != ContentKind::Component {
            return Ok(ResolvedItem {
                kind: &item.kind,
                payload: &item.content,
                style: item_style,
                grid_area: item.grid_area(),
                position: item.position(),
                frame: item.frame.as_ref(),
                component_id: None,
            });
        }

        let id = item.component_id().unwrap_or_default();
        let component = self.get(id).ok_or_else(|| ComponentMiss {
            id: id.to_string(),
        })?;

        let style = match &component.style {
            Some(base) => base.merged(&item_style),
            None => item_style,
        };

        Ok(ResolvedItem {
            kind: &component.kind,
            payload: &component.content,
            style,
            grid_area: item.grid_area(),
            position: item.position(),
            frame: item.frame.as_ref(),
            component_id: Some(component.id.as_str()),
        })
    }
}

/// A content item with any component reference followed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem<'a> {
    pub kind: &'a ContentKind,
    pub payload: &'a ContentPayload,
    /// Effective style after merging overrides
    pub style: Style,
    pub grid_area: Option<GridArea>,
    pub position: Option<&'a NamedPosition>,
    pub frame: Option<&'a Frame>,
    /// Id of the component this came from, if any
    pub component_id: Option<&'a str>,
}

/// A component reference whose id is not defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMiss {
    pub id: String,
}

impl ComponentMiss {
    /// Placeholder text shown in place of the missing component.
    pub fn placeholder_text(&self) -> String {
        format!("[Component not found: {}]", self.id)
    }
}

impl fmt::Display for ComponentMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component '{}' is not defined", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_component() -> Component {
        let content = ContentPayload {
            text: Some("Welcome".into()),
            ..Default::default()
        };
        Component::new("header-text", "text")
            .with_content(content)
            .with_style(Style {
                font_size: Some("32".into()),
                alignment: Some("center".into()),
                ..Default::default()
            })
    }

    #[test]
    fn test_resolve_merges_style() {
        let components = vec![header_component()];
        let map = ComponentMap::new(&components);

        let item = ContentItem::component("header-text")
            .with_grid_area(GridArea::new(1, 6, 1, 1))
            .with_style(Style {
                alignment: Some("right".into()),
                ..Default::default()
            });

        let resolved = map.resolve(&item).unwrap();
        assert_eq!(*resolved.kind, ContentKind::Text);
        assert_eq!(resolved.payload.text.as_deref(), Some("Welcome"));
        assert_eq!(resolved.style.alignment.as_deref(), Some("right"));
        assert_eq!(resolved.style.font_size_or(16.0), 32.0);
        assert_eq!(resolved.grid_area, Some(GridArea::new(1, 6, 1, 1)));
        assert_eq!(resolved.component_id, Some("header-text"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let components = vec![header_component()];
        let map = ComponentMap::new(&components);
        let item = ContentItem::component("header-text");

        let first = map.resolve(&item).unwrap();
        let second = map.resolve(&item).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_miss() {
        let map = ComponentMap::new(&[]);
        let miss = map
            .resolve(&ContentItem::component("missing-1"))
            .unwrap_err();
        assert_eq!(miss.id, "missing-1");
        assert_eq!(miss.placeholder_text(), "[Component not found: missing-1]");
    }

    #[test]
    fn test_missing_component_id_is_a_miss() {
        let components = vec![header_component()];
        let map = ComponentMap::new(&components);
        let item = ContentItem::new(ContentKind::Component);
        assert_eq!(map.resolve(&item).unwrap_err().id, "");
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let first = header_component();
        let mut second = header_component();
        second.content.text = Some("Second".into());
        let components = vec![first, second];

        let map = ComponentMap::new(&components);
        assert_eq!(map.len(), 1);
        let item = ContentItem::component("header-text");
        let resolved = map.resolve(&item).unwrap();
        assert_eq!(resolved.payload.text.as_deref(), Some("Second"));
    }

    #[test]
    fn test_inline_item_passes_through() {
        let map = ComponentMap::new(&[]);
        let item = ContentItem::text("Hello");
        let resolved = map.resolve(&item).unwrap();
        assert_eq!(*resolved.kind, ContentKind::Text);
        assert!(resolved.component_id.is_none());
        assert!(resolved.style.is_empty());
    }
}
