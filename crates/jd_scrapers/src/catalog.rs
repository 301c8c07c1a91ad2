//! Fixed table of supported journals and their URL slugs.

use jd_core::JournalEntry;

const fn entry(name: &'static str, slug: &'static str) -> JournalEntry {
    JournalEntry { name, slug }
}

static JOURNALS: &[JournalEntry] = &[
    entry("Nature", "nature"),
    entry("Nature Aging", "nataging"),
    entry("Nature Biomedical Engineering", "natbiomedeng"),
    entry("Nature Biotechnology", "nbt"),
    entry("Nature Cancer", "natcancer"),
    entry("Nature Catalysis", "natcatal"),
    entry("Nature Cell Biology", "ncb"),
    entry("Nature Chemical Biology", "nchembio"),
    entry("Nature Chemistry", "nchem"),
    entry("Nature Climate Change", "nclimate"),
    entry("Nature Communications", "ncomms"),
    entry("Nature Computational Science", "natcomputsci"),
    entry("Nature Ecology & Evolution", "natecolevol"),
    entry("Nature Electronics", "natelectron"),
    entry("Nature Energy", "nenergy"),
    entry("Nature Food", "natfood"),
    entry("Nature Genetics", "ng"),
    entry("Nature Geoscience", "ngeo"),
    entry("Nature Human Behaviour", "nathumbehav"),
    entry("Nature Immunology", "ni"),
    entry("Nature Machine Intelligence", "natmachintell"),
    entry("Nature Materials", "nmat"),
    entry("Nature Medicine", "nm"),
    entry("Nature Metabolism", "natmetab"),
    entry("Nature Methods", "nmeth"),
    entry("Nature Microbiology", "nmicrobiol"),
    entry("Nature Nanotechnology", "nnano"),
    entry("Nature Neuroscience", "neuro"),
    entry("Nature Photonics", "nphoton"),
    entry("Nature Physics", "nphys"),
    entry("Nature Plants", "nplants"),
    entry("Nature Reviews Cancer", "nrc"),
    entry("Nature Reviews Drug Discovery", "nrd"),
    entry("Nature Reviews Genetics", "nrg"),
    entry("Nature Reviews Immunology", "nri"),
    entry("Nature Reviews Molecular Cell Biology", "nrm"),
    entry("Nature Reviews Neuroscience", "nrn"),
    entry("Nature Structural & Molecular Biology", "nsmb"),
    entry("Nature Sustainability", "natsustain"),
    entry("Scientific Reports", "srep"),
];

#[derive(Debug, Clone, Copy)]
pub struct JournalCatalog {
    entries: &'static [JournalEntry],
}

impl JournalCatalog {
    pub fn new(entries: &'static [JournalEntry]) -> Self {
        Self { entries }
    }

    /// Case-insensitive exact match on the full journal name.
    pub fn lookup(&self, name: &str) -> Option<JournalEntry> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == wanted)
            .copied()
    }

    pub fn list_all(&self) -> &'static [JournalEntry] {
        self.entries
    }
}

impl Default for JournalCatalog {
    fn default() -> Self {
        Self::new(JOURNALS)
    }
}
