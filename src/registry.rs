//! SEO page registry: a JSON document of planned and published site pages.
//!
//! Independent of the transcript pipeline; used by the `seo-registry` binary.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCHEMA_VERSION: &str = "1.0";

const META_TITLE_MAX: usize = 60;
const META_DESCRIPTION_MAX: usize = 160;
const DEFAULT_SECTION_WORDS: u64 = 300;
const DEFAULT_WORD_COUNT: u64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Page ID '{0}' already exists.")]
    DuplicateId(String),

    #[error("Page ID '{0}' not found.")]
    NotFound(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub last_updated: String,
    pub pages: Vec<Page>,
    pub site_config: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub domain: String,
    pub default_language: String,
    pub sitemap_path: String,
    pub robots_txt_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub status: String,
    pub priority: String,
    pub target_keywords: TargetKeywords,
    pub meta: PageMeta,
    pub content: PageContent,
    pub schema: SchemaMarkup,
    pub interlinking: Interlinking,
    pub audit: Audit,
    pub analytics: Analytics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetKeywords {
    pub primary: String,
    pub secondary: Vec<String>,
    pub longtail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub robots: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub h1: String,
    pub sections: Vec<Value>,
    pub estimated_word_count: u64,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMarkup {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interlinking {
    pub links_to: Vec<String>,
    pub linked_from: Vec<String>,
    pub hub: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub last_audit_date: Option<String>,
    pub score: Option<u32>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub monthly_search_volume: u64,
    pub current_ranking: Option<u32>,
    pub estimated_traffic: u64,
}

/// Fields supplied when creating a page; everything else is derived
#[derive(Debug, Clone)]
pub struct NewPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub page_type: String,
    pub primary_keyword: String,
    pub secondary_keywords: Vec<String>,
    pub longtail_keywords: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub h1: String,
    pub sections: Vec<Value>,
    pub schema_type: String,
    pub content_type: String,
    pub priority: String,
    pub links_to: Vec<String>,
    pub linked_from: Vec<String>,
    pub hub: Option<String>,
}

impl NewPage {
    pub fn new(id: &str, title: &str, slug: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            page_type: "blog".to_string(),
            primary_keyword: String::new(),
            secondary_keywords: Vec::new(),
            longtail_keywords: Vec::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            h1: String::new(),
            sections: Vec::new(),
            schema_type: "Article".to_string(),
            content_type: "informational".to_string(),
            priority: "medium".to_string(),
            links_to: Vec::new(),
            linked_from: Vec::new(),
            hub: None,
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

impl Page {
    /// Build a draft page entry
    pub fn new(spec: NewPage) -> Self {
        let word_count = if spec.sections.is_empty() {
            DEFAULT_WORD_COUNT
        } else {
            spec.sections
                .iter()
                .map(|s| s.get("wordCountTarget").and_then(Value::as_u64).unwrap_or(DEFAULT_SECTION_WORDS))
                .sum()
        };

        let meta_title = if spec.meta_title.is_empty() {
            truncate(&spec.title, META_TITLE_MAX)
        } else {
            spec.meta_title
        };
        let meta_description = truncate(&spec.meta_description, META_DESCRIPTION_MAX);
        let h1 = if spec.h1.is_empty() { spec.title.clone() } else { spec.h1 };

        Self {
            id: spec.id,
            title: spec.title,
            slug: spec.slug.clone(),
            page_type: spec.page_type,
            status: "draft".to_string(),
            priority: spec.priority,
            target_keywords: TargetKeywords {
                primary: spec.primary_keyword,
                secondary: spec.secondary_keywords,
                longtail: spec.longtail_keywords,
            },
            meta: PageMeta {
                title: meta_title.clone(),
                description: meta_description.clone(),
                canonical: spec.slug,
                robots: "index,follow".to_string(),
                og_title: meta_title,
                og_description: meta_description,
                og_image: String::new(),
            },
            content: PageContent {
                h1,
                sections: spec.sections,
                estimated_word_count: word_count,
                content_type: spec.content_type,
            },
            schema: SchemaMarkup {
                schema_type: spec.schema_type,
                data: Map::new(),
            },
            interlinking: Interlinking {
                links_to: spec.links_to,
                linked_from: spec.linked_from,
                hub: spec.hub,
            },
            audit: Audit::default(),
            analytics: Analytics::default(),
        }
    }
}

/// One `<url>` entry for a sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

impl Registry {
    /// An empty registry for a site
    pub fn create(domain: &str, language: &str) -> Self {
        Self {
            schema: "seo-pages-schema".to_string(),
            version: SCHEMA_VERSION.to_string(),
            last_updated: now(),
            pages: Vec::new(),
            site_config: SiteConfig {
                domain: domain.to_string(),
                default_language: language.to_string(),
                sitemap_path: "/sitemap.xml".to_string(),
                robots_txt_path: "/robots.txt".to_string(),
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, data).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved registry: {}", path.display());
        Ok(())
    }

    pub fn add_page(&mut self, page: Page) -> Result<()> {
        if self.pages.iter().any(|p| p.id == page.id) {
            return Err(RegistryError::DuplicateId(page.id));
        }
        self.pages.push(page);
        self.last_updated = now();
        Ok(())
    }

    pub fn update_audit(&mut self, page_id: &str, score: u32, issues: Vec<String>) -> Result<()> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| RegistryError::NotFound(page_id.to_string()))?;

        let stamp = now();
        page.audit = Audit {
            last_audit_date: Some(stamp.clone()),
            score: Some(score),
            issues,
        };
        self.last_updated = stamp;
        Ok(())
    }

    /// Fixed-width table of pages
    pub fn render_table(&self) -> String {
        if self.pages.is_empty() {
            return "No pages in registry.".to_string();
        }

        let mut lines = vec![
            format!("{:<30} {:<12} {:<12} {:<8} {:<10}", "ID", "Type", "Status", "Score", "Priority"),
            "-".repeat(72),
        ];
        for page in &self.pages {
            let score = page.audit.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{:<30} {:<12} {:<12} {:<8} {:<10}",
                page.id, page.page_type, page.status, score, page.priority
            ));
        }
        lines.join("\n")
    }

    /// Sitemap entries for published pages
    pub fn sitemap_entries(&self) -> Vec<UrlEntry> {
        let domain = self.site_config.domain.trim_end_matches('/');
        let lastmod: String = self.last_updated.chars().take(10).collect();

        self.pages
            .iter()
            .filter(|p| p.status == "published")
            .map(|p| UrlEntry {
                loc: format!("{domain}{}", p.slug),
                lastmod: lastmod.clone(),
                changefreq: if p.page_type == "blog" { "weekly" } else { "monthly" }.to_string(),
                priority: match p.priority.as_str() {
                    "high" => "1.0",
                    "medium" => "0.7",
                    "low" => "0.4",
                    _ => "0.5",
                }
                .to_string(),
            })
            .collect()
    }
}

/// Add a page to the registry file at `path`
pub fn add_page(path: &Path, page: Page) -> Result<Registry> {
    let mut registry = Registry::load(path)?;
    registry.add_page(page)?;
    registry.save(path)?;
    Ok(registry)
}

/// Record audit results for a page in the registry file at `path`
pub fn update_audit(path: &Path, page_id: &str, score: u32, issues: Vec<String>) -> Result<Registry> {
    let mut registry = Registry::load(path)?;
    registry.update_audit(page_id, score, issues)?;
    registry.save(path)?;
    Ok(registry)
}

pub fn list_pages(path: &Path) -> Result<()> {
    println!("{}", Registry::load(path)?.render_table());
    Ok(())
}

pub fn sitemap_entries(path: &Path) -> Result<Vec<UrlEntry>> {
    Ok(Registry::load(path)?.sitemap_entries())
}
