//! Info panel describing the tags under the pointer.
//!
//! The panel holds one [`PanelEntry`] per hovered tag. [`InfoPanel::sync`] diffs
//! the entries against the new hit set: entries that are still hovered are moved
//! into the new list untouched, entries for newly hovered tags are built and
//! appended, and everything else is dropped when the old list is discarded.

use std::rc::Rc;

use crate::color::TagColor;
use crate::config::ReferenceLinks;
use crate::constants::labels;
use crate::model::{Tag, TagId};

/// A hyperlink in a panel entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLink {
    pub text: String,
    pub href: String,
}

impl PanelLink {
    fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// One gene link row of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneLinkRow {
    /// Row label, only set on the first row
    pub label: &'static str,
    pub name: String,
    pub allele: Option<PanelLink>,
    pub gbrowse: PanelLink,
    pub gene_model: PanelLink,
}

/// The panel entry for one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    tag_id: TagId,
    serial: u64,
    /// "<description>(Created by: <author>)"
    pub description: String,
    /// CSS color of the swatch
    pub swatch: String,
    pub gene_links: Vec<GeneLinkRow>,
    /// Shown instead of gene link rows when the tag has none
    pub note: Option<&'static str>,
}

impl PanelEntry {
    pub fn tag_id(&self) -> TagId {
        self.tag_id
    }

    /// Element id of the entry in the host page.
    pub fn dom_id(&self) -> String {
        format!("{}-info", self.tag_id)
    }

    /// Build counter value at the time this entry was created.
    /// An entry kept across syncs keeps its serial.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn description_label(&self) -> &'static str {
        labels::TAG_NAME
    }

    pub fn color_label(&self) -> &'static str {
        labels::COLOR
    }
}

/// What an entry needs besides the tag itself.
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    pub links: &'a ReferenceLinks,
    /// Gene symbol of the image, used in genome browser links
    pub gene_symbol: &'a str,
    pub fill_alpha: f32,
}

/// Outcome of one sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub kept: usize,
    pub removed: usize,
}

/// The side panel listing hovered tags.
#[derive(Debug, Default)]
pub struct InfoPanel {
    entries: Vec<PanelEntry>,
    title_visible: bool,
    next_serial: u64,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    pub fn entry(&self, tag_id: TagId) -> Option<&PanelEntry> {
        self.entries.iter().find(|e| e.tag_id == tag_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn title_visible(&self) -> bool {
        self.title_visible
    }

    pub fn set_title_visible(&mut self, visible: bool) {
        self.title_visible = visible;
    }

    /// Bring the entries in line with the hovered tags.
    pub fn sync(&mut self, hits: &[Rc<Tag>], ctx: &EntryContext<'_>) -> SyncReport {
        let mut hit_ids: Vec<TagId> = Vec::with_capacity(hits.len());
        for tag in hits {
            match tag.id() {
                Some(id) if !hit_ids.contains(&id) => hit_ids.push(id),
                Some(_) => {}
                None => log::warn!("Hovered tag '{}' has no id, not listed", tag.description()),
            }
        }

        let mut report = SyncReport::default();
        let mut next: Vec<PanelEntry> = Vec::with_capacity(hit_ids.len());

        for entry in std::mem::take(&mut self.entries) {
            let confirmed = hit_ids.contains(&entry.tag_id);
            let duplicate = next.iter().any(|e| e.tag_id == entry.tag_id);
            if confirmed && !duplicate {
                report.kept += 1;
                next.push(entry);
            } else {
                report.removed += 1;
            }
        }

        for tag in hits {
            let Some(id) = tag.id() else { continue };
            if next.iter().any(|e| e.tag_id == id) {
                continue;
            }
            let entry = self.build_entry(id, tag, ctx);
            next.push(entry);
            report.added += 1;
        }

        self.entries = next;
        report
    }

    /// Remove all entries and hide the title.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.title_visible = false;
    }

    fn build_entry(&mut self, tag_id: TagId, tag: &Tag, ctx: &EntryContext<'_>) -> PanelEntry {
        self.next_serial += 1;

        let gene_links: Vec<GeneLinkRow> = tag
            .gene_links()
            .iter()
            .enumerate()
            .map(|(i, link)| GeneLinkRow {
                label: if i == 0 { labels::GENE_LINKS } else { "" },
                name: link.name.clone(),
                allele: link
                    .allele()
                    .map(|allele| PanelLink::new(format!("({})", allele), ctx.links.allele(allele))),
                gbrowse: PanelLink::new(labels::GBROWSER, ctx.links.gbrowse(ctx.gene_symbol)),
                gene_model: PanelLink::new(labels::GENE_MODEL, ctx.links.gene_model(ctx.gene_symbol)),
            })
            .collect();

        let note = gene_links.is_empty().then_some(labels::NO_GENE_LINKS);

        PanelEntry {
            tag_id,
            serial: self.next_serial,
            description: format!("{}(Created by: {})", tag.description(), tag.author()),
            swatch: swatch_css(tag.color(), ctx.fill_alpha),
            gene_links,
            note,
        }
    }

    #[cfg(test)]
    pub(crate) fn push_raw(&mut self, entry: PanelEntry) {
        self.entries.push(entry);
    }
}

fn swatch_css(color: TagColor, alpha: f32) -> String {
    format!("background-color: {}", color.formatted(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeneLink;

    fn tag(id: TagId) -> Rc<Tag> {
        let mut tag = Tag::new(TagColor::new(10, 20, 30), vec![], format!("tag {}", id), 1)
            .with_author("bob");
        tag.set_id(id);
        Rc::new(tag)
    }

    fn ctx(links: &ReferenceLinks) -> EntryContext<'_> {
        EntryContext {
            links,
            gene_symbol: "bz1",
            fill_alpha: 0.5,
        }
    }

    fn ids(panel: &InfoPanel) -> Vec<TagId> {
        panel.entries().iter().map(|e| e.tag_id()).collect()
    }

    #[test]
    fn test_entries_follow_hits() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();

        let report = panel.sync(&[tag(1), tag(2)], &ctx(&links));
        assert_eq!(report, SyncReport { added: 2, kept: 0, removed: 0 });
        assert_eq!(ids(&panel), vec![1, 2]);

        let report = panel.sync(&[tag(2), tag(3)], &ctx(&links));
        assert_eq!(report, SyncReport { added: 1, kept: 1, removed: 1 });
        assert_eq!(ids(&panel), vec![2, 3]);

        panel.sync(&[], &ctx(&links));
        assert!(panel.is_empty());
    }

    #[test]
    fn test_kept_entries_are_not_rebuilt() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();

        panel.sync(&[tag(1)], &ctx(&links));
        let serial = panel.entry(1).unwrap().serial();

        panel.sync(&[tag(1), tag(2)], &ctx(&links));
        panel.sync(&[tag(2), tag(1)], &ctx(&links));
        assert_eq!(panel.entry(1).unwrap().serial(), serial);
        // New entries are appended after surviving ones
        assert_eq!(ids(&panel), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();
        panel.sync(&[tag(4)], &ctx(&links));
        let first = panel.entries()[0].clone();
        let mut second = first.clone();
        second.serial = 99;
        panel.push_raw(second);
        assert_eq!(panel.len(), 2);

        panel.sync(&[tag(4)], &ctx(&links));
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.entries()[0].serial(), first.serial());
    }

    #[test]
    fn test_same_tag_hit_twice_listed_once() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();
        let t = tag(5);
        panel.sync(&[t.clone(), t], &ctx(&links));
        assert_eq!(panel.len(), 1);
    }

    #[test]
    fn test_unsaved_tags_are_skipped() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();
        let unsaved = Rc::new(Tag::new(TagColor::new(1, 1, 1), vec![], "draft", 1));
        panel.sync(&[unsaved], &ctx(&links));
        assert!(panel.is_empty());
    }

    #[test]
    fn test_entry_contents() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();
        let mut t = Tag::new(TagColor::new(255, 0, 0), vec![], "Kernel", 1)
            .with_author("carol")
            .with_gene_links(vec![
                GeneLink::new("bz1").with_allele("bz1-m4"),
                GeneLink::new("c1"),
            ]);
        t.set_id(8);
        panel.sync(&[Rc::new(t)], &ctx(&links));

        let entry = panel.entry(8).unwrap();
        assert_eq!(entry.dom_id(), "8-info");
        assert_eq!(entry.description, "Kernel(Created by: carol)");
        assert_eq!(entry.swatch, "background-color: rgba(255,0,0,0.5)");
        assert!(entry.note.is_none());

        let rows = &entry.gene_links;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Gene Links:");
        assert_eq!(rows[1].label, "");
        let allele = rows[0].allele.as_ref().unwrap();
        assert_eq!(allele.text, "(bz1-m4)");
        assert!(allele.href.ends_with("/variation/bz1-m4"));
        assert!(rows[1].allele.is_none());
        assert_eq!(rows[1].gbrowse.text, "GBrowser");
        assert!(rows[1].gene_model.href.ends_with("/gene/bz1"));
    }

    #[test]
    fn test_entry_without_gene_links_has_note() {
        let links = ReferenceLinks::default();
        let mut panel = InfoPanel::new();
        panel.sync(&[tag(3)], &ctx(&links));
        let entry = panel.entry(3).unwrap();
        assert!(entry.gene_links.is_empty());
        assert_eq!(entry.note, Some("There are no gene links for this tag."));
    }
}
