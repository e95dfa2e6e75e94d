//! The tag board: an interactive overlay of tag polygons on an image.
//!
//! [`TagBoard`] owns the render [`Stage`] and everything drawn on it. The host
//! forwards pointer and click events; the board hit-tests them against the
//! polygons of the currently shown groups, highlights what is under the
//! pointer and keeps the [`InfoPanel`] in sync.
//!
//! All handlers take `&mut self` and run to completion, so hover processing is
//! never re-entered. The interaction lock is a separate, user-controlled pause:
//! clicking a polygon pins the current hover state until the next click.

mod polygon;


pub use polygon::{highlight_fill, rest_fill, tag_to_polygon};

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::color::Paint;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::export::{CachedDataFile, DataFile, ExportFormat, ExportKind, ExportRequest, FreshDataFile};
use crate::geometry::{ImageView, Point};
use crate::info_panel::{EntryContext, InfoPanel};
use crate::model::{
    GroupId, ImageMetadata, NewTag, RawTagGroup, SavedTag, Tag, TagGroup, TagId, validate_points,
};
use crate::service::TagService;
use crate::surface::{Container, Layer, Painter, Poly, Stage};

/// Interactive overlay of tag polygons.
pub struct TagBoard {
    container: Container,
    image: ImageView,
    metadata: ImageMetadata,
    config: BoardConfig,
    tag_groups: Vec<TagGroup>,
    /// Keys of the groups that are drawn
    current_groups: BTreeSet<GroupId>,
    stage: Option<Stage>,
    /// Set while the user has pinned the hover state
    locked: bool,
    /// Whether polygons are filled at rest
    tags_visible: bool,
    /// Layer indices of the polygons under the pointer
    visible_shapes: Vec<usize>,
    /// Whether pointer events are being handled; set by `render`
    pointer_bound: bool,
    info_panel: InfoPanel,
    painter: Option<Box<dyn Painter>>,
}

impl TagBoard {
    /// Create a board from the backend's tag groups. Every group starts out shown.
    ///
    /// Nothing is drawn until [`TagBoard::render`] is called.
    pub fn new(
        container: Container,
        raw_groups: Vec<RawTagGroup>,
        image: ImageView,
        metadata: ImageMetadata,
        config: BoardConfig,
    ) -> Self {
        let tag_groups: Vec<TagGroup> = raw_groups.into_iter().map(TagGroup::from_raw).collect();
        let current_groups = tag_groups.iter().map(TagGroup::key).collect();

        log::info!(
            "Tag board for image {} with {} groups ({} tags)",
            metadata.id,
            tag_groups.len(),
            tag_groups.iter().map(TagGroup::len).sum::<usize>()
        );

        Self {
            container,
            image,
            metadata,
            config,
            tag_groups,
            current_groups,
            stage: None,
            locked: false,
            tags_visible: true,
            visible_shapes: Vec::new(),
            pointer_bound: false,
            info_panel: InfoPanel::new(),
            painter: None,
        }
    }

    /// Create a board from the backend's JSON list of tag groups.
    pub fn from_json(
        container: Container,
        groups_json: &str,
        image: ImageView,
        metadata: ImageMetadata,
        config: BoardConfig,
    ) -> Result<Self, BoardError> {
        let raw_groups: Vec<RawTagGroup> = serde_json::from_str(groups_json)?;
        Ok(Self::new(container, raw_groups, image, metadata, config))
    }

    /// Set the backend that receives draw calls on repaint.
    pub fn set_painter(&mut self, painter: Box<dyn Painter>) {
        self.painter = Some(painter);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Rebuild the stage from the current groups.
    ///
    /// Safe to call any number of times: the stage is resized rather than
    /// recreated, all polygons are rebuilt, the hover state and info panel are
    /// reset and the interaction lock is released.
    pub fn render(&mut self) {
        self.locked = false;
        let (width, height) = (self.container.width, self.container.height);

        let mut layer = Layer::new();
        for key in &self.current_groups {
            let Some(group) = self.tag_groups.iter().find(|g| g.key() == *key) else {
                continue;
            };
            for tag in group.tags() {
                layer.add(tag_to_polygon(tag, &self.image, &self.config.style, self.tags_visible));
            }
        }
        let polygon_count = layer.len();

        let stage = self.stage.get_or_insert_with(|| Stage::new(width, height));
        stage.set_size(width, height);
        stage.remove_children();
        stage.add(layer);
        if let Some(layer) = stage.layer_mut() {
            layer.draw(self.painter.as_deref_mut());
        }

        // Indices into the old layer are meaningless now
        self.visible_shapes.clear();
        self.info_panel.clear();
        self.pointer_bound = true;

        log::debug!(
            "Rendered {} polygons from {} groups on a {}x{} stage",
            polygon_count,
            self.current_groups.len(),
            width,
            height
        );
    }

    /// Resize the container and re-render.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.container.width = width;
        self.container.height = height;
        self.render();
    }

    /// Change the size the image is displayed at and re-render.
    pub fn set_zoom(&mut self, display_width: f32, display_height: f32) {
        self.image.set_display_size(display_width, display_height);
        self.render();
    }

    /// Show or hide tag fills. Hidden tags stay hoverable.
    pub fn toggle_visibility(&mut self) {
        self.tags_visible = !self.tags_visible;
        log::debug!("Tag fills {}", if self.tags_visible { "shown" } else { "hidden" });
        self.render();
    }

    // ========================================================================
    // Pointer handling
    // ========================================================================

    /// Handle pointer movement over the container (container coordinates).
    pub fn on_pointer_move(&mut self, position: Point) {
        if self.locked || !self.pointer_bound {
            return;
        }
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        let style = self.config.style;
        let tags_visible = self.tags_visible;

        // Undo the previous highlight
        let previous = std::mem::take(&mut self.visible_shapes);
        if let Some(layer) = stage.layer_mut() {
            for &index in &previous {
                if let Some(poly) = layer.get_mut(index) {
                    poly.fill = rest_fill(poly.tag(), tags_visible, &style);
                    poly.stroke = Paint::TRANSPARENT;
                }
            }
        }

        let hits = stage.intersections(position);
        self.info_panel.set_title_visible(!hits.is_empty());

        let mut hit_tags = Vec::with_capacity(hits.len());
        if let Some(layer) = stage.layer_mut() {
            for &index in &hits {
                if let Some(poly) = layer.get_mut(index) {
                    poly.fill = highlight_fill(poly.tag(), &style);
                    poly.stroke = style.highlight_stroke;
                    hit_tags.push(Rc::clone(poly.tag()));
                }
            }
        }

        let ctx = EntryContext {
            links: &self.config.links,
            gene_symbol: &self.metadata.gene_symbol,
            fill_alpha: style.fill_alpha,
        };
        let report = self.info_panel.sync(&hit_tags, &ctx);
        if report.added > 0 || report.removed > 0 {
            log::trace!(
                "Info panel at ({}, {}): {} added, {} kept, {} removed",
                position.x,
                position.y,
                report.added,
                report.kept,
                report.removed
            );
        }

        self.visible_shapes = hits;

        if let Some(layer) = stage.layer_mut() {
            layer.draw(self.painter.as_deref_mut());
        }
    }

    /// Handle a click. Clicking a polygon toggles the interaction lock.
    /// Returns whether the board is locked afterwards.
    pub fn on_click(&mut self, position: Point) -> bool {
        if !self.pointer_bound {
            return self.locked;
        }
        let on_polygon = self
            .stage
            .as_ref()
            .is_some_and(|stage| !stage.intersections(position).is_empty());
        if on_polygon {
            self.locked = !self.locked;
            log::debug!("Interaction {}", if self.locked { "locked" } else { "unlocked" });
        }
        self.locked
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Create a tag, save it, and add it to its group.
    ///
    /// On success the tag is added, the board re-rendered and `on_success`
    /// called. On failure `on_error` receives the message and nothing changes.
    pub fn add_tag(
        &mut self,
        new_tag: NewTag,
        service: &mut dyn TagService,
        on_success: impl FnOnce(),
        on_error: impl FnOnce(String),
    ) {
        let group_id = new_tag.group_id;
        let draft = match self.draft_tag(new_tag) {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("Rejected new tag: {}", e);
                on_error(e.to_string());
                return;
            }
        };

        let saved = match service.save_tag(&draft) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Failed to save tag in group {}: {}", group_id, e);
                on_error(e.message);
                return;
            }
        };

        match self.commit_tag(draft, saved) {
            Ok(_) => on_success(),
            Err(e) => on_error(e.to_string()),
        }
    }

    /// Build an unsaved tag for a group, checking its geometry.
    ///
    /// Use together with [`TagBoard::commit_tag`] when the save completes later.
    pub fn draft_tag(&self, new_tag: NewTag) -> Result<Tag, BoardError> {
        validate_points(&new_tag.points)?;
        if self.group(new_tag.group_id).is_none() {
            return Err(BoardError::UnknownGroup { id: new_tag.group_id });
        }
        Ok(Tag::new(
            new_tag.color,
            new_tag.points,
            new_tag.description,
            new_tag.group_id,
        ))
    }

    /// Add a successfully saved tag to its group and re-render.
    pub fn commit_tag(&mut self, mut tag: Tag, saved: SavedTag) -> Result<TagId, BoardError> {
        let group_id = tag.group_id();
        let group = self
            .tag_groups
            .iter_mut()
            .find(|g| g.id() == group_id)
            .ok_or(BoardError::UnknownGroup { id: group_id })?;

        tag.set_id(saved.id);
        if let Some(user) = saved.user {
            tag = tag.with_author(user);
        }
        group.add_tag(Rc::new(tag));
        log::info!("Saved tag {} in group {}", saved.id, group_id);

        self.render();
        Ok(saved.id)
    }

    /// Create a new, empty tag group and show it.
    ///
    /// The board is not re-rendered; the new group has no tags yet.
    pub fn add_new_tag_group(
        &mut self,
        name: &str,
        service: &mut dyn TagService,
        on_success: impl FnOnce(),
        on_error: impl FnOnce(String),
    ) {
        match service.create_group(self.metadata.id, name) {
            Ok(raw) => {
                let group = TagGroup::from_raw(raw);
                let key = group.key();
                log::info!("Created tag group {} '{}'", key, group.name());
                if let Some(existing) = self.tag_groups.iter_mut().find(|g| g.key() == key) {
                    *existing = group;
                } else {
                    self.tag_groups.push(group);
                }
                self.current_groups.insert(key);
                on_success();
            }
            Err(e) => {
                log::warn!("Failed to create tag group '{}': {}", name, e);
                on_error(e.message);
            }
        }
    }

    // ========================================================================
    // Shown groups
    // ========================================================================

    /// Show or hide a group, optionally re-rendering.
    pub fn set_current_group(
        &mut self,
        group_id: GroupId,
        visible: bool,
        redraw: bool,
    ) -> Result<(), BoardError> {
        if self.group(group_id).is_none() {
            return Err(BoardError::UnknownGroup { id: group_id });
        }
        if visible {
            self.current_groups.insert(group_id);
        } else {
            self.current_groups.remove(&group_id);
        }
        if redraw {
            self.render();
        }
        Ok(())
    }

    /// Hide every group. Takes effect on the next render.
    pub fn clear_current_groups(&mut self) {
        self.current_groups.clear();
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Create the data file for one of the four export strategies.
    pub fn create_export<'a>(
        &self,
        kind: ExportKind,
        request: &ExportRequest,
        service: &'a mut dyn TagService,
    ) -> Box<dyn DataFile + 'a> {
        match kind {
            ExportKind::XmlCached => Box::new(CachedDataFile::new(
                ExportFormat::Xml,
                &self.metadata,
                &self.tag_groups,
                request,
            )),
            ExportKind::JsonCached => Box::new(CachedDataFile::new(
                ExportFormat::Json,
                &self.metadata,
                &self.tag_groups,
                request,
            )),
            ExportKind::XmlFresh => Box::new(FreshDataFile::new(
                ExportFormat::Xml,
                &self.metadata,
                request,
                service,
            )),
            ExportKind::JsonFresh => Box::new(FreshDataFile::new(
                ExportFormat::Json,
                &self.metadata,
                request,
                service,
            )),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn image_url(&self) -> &str {
        &self.metadata.url
    }

    pub fn organisms(&self) -> &[String] {
        &self.metadata.organisms
    }

    pub fn uploaded_by(&self) -> &str {
        &self.metadata.uploaded_by
    }

    pub fn upload_date(&self) -> &str {
        &self.metadata.upload_date
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn image_view(&self) -> &ImageView {
        &self.image
    }

    pub fn tag_groups(&self) -> &[TagGroup] {
        &self.tag_groups
    }

    pub fn group(&self, id: GroupId) -> Option<&TagGroup> {
        self.tag_groups.iter().find(|g| g.id() == id)
    }

    /// Groups that are drawn, ordered by key.
    pub fn current_groups(&self) -> impl Iterator<Item = &TagGroup> {
        self.current_groups.iter().filter_map(|key| self.group(*key))
    }

    pub fn is_current(&self, id: GroupId) -> bool {
        self.current_groups.contains(&id)
    }

    /// Tags under the pointer, keyed by id.
    pub fn selected_tags(&self) -> BTreeMap<TagId, Rc<Tag>> {
        self.visible_shapes
            .iter()
            .filter_map(|&index| self.poly(index))
            .filter_map(|poly| poly.tag().id().map(|id| (id, Rc::clone(poly.tag()))))
            .collect()
    }

    /// Layer indices of the polygons under the pointer.
    pub fn visible_shapes(&self) -> &[usize] {
        &self.visible_shapes
    }

    pub fn poly(&self, index: usize) -> Option<&Poly> {
        self.stage.as_ref()?.layer()?.get(index)
    }

    /// Page position of a polygon's info tooltip.
    pub fn tooltip_position(&self, index: usize) -> Option<Point> {
        let anchor = self.poly(index)?.anchor();
        let offset = self.container.offset;
        Some(Point::new(offset.x + anchor.x, offset.y + anchor.y))
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn info_panel(&self) -> &InfoPanel {
        &self.info_panel
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn tags_visible(&self) -> bool {
        self.tags_visible
    }

    /// Whether pointer events are handled (true after the first render).
    pub fn pointer_bound(&self) -> bool {
        self.pointer_bound
    }
}
