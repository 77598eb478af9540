//! Retrievable documents derived from the knowledge base.

use std::fmt;

use crate::kb::{Contact, Employee, KnowledgeBase, MissionArea};

/// Category tag carried by every document and printed in the context block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    CompanyInfo,
    Employee,
    Mission,
    Contact,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::CompanyInfo => "company_info",
            DocumentKind::Employee => "employee",
            DocumentKind::Mission => "mission",
            DocumentKind::Contact => "contact",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One conceptual record of the knowledge base rendered as text.
///
/// Immutable once built; the lowercased copy used for scoring always matches
/// `content`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievableDocument {
    kind: DocumentKind,
    content: String,
    label: Option<String>,
    haystack: String,
}

impl RetrievableDocument {
    pub fn new(kind: DocumentKind, content: String, label: Option<String>) -> Self {
        let haystack = content.to_lowercase();
        Self {
            kind,
            content,
            label,
            haystack,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Employee name or mission category, when the document has one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Lowercased content, computed once at derivation.
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// Derives the document list in a fixed order: company summary, employees,
/// mission areas, contact. Pure.
pub fn build_documents(kb: &KnowledgeBase) -> Vec<RetrievableDocument> {
    let mut docs = Vec::with_capacity(2 + kb.employees.len() + kb.mission_areas.len());
    docs.push(company_document(kb));
    docs.extend(kb.employees.iter().map(employee_document));
    docs.extend(kb.mission_areas.iter().map(mission_document));
    docs.push(contact_document(&kb.contact));
    docs
}

/// Synthetic document returned when no document matches a question.
pub fn fallback_document(kb: &KnowledgeBase) -> RetrievableDocument {
    RetrievableDocument::new(
        DocumentKind::CompanyInfo,
        format!("Company: {}\nMission: {}", kb.name, kb.mission),
        None,
    )
}

fn company_document(kb: &KnowledgeBase) -> RetrievableDocument {
    let content = format!(
        "Company: {}\nFounder: {}\nCo-founders: {}\nMission: {}\nTagline: {}\nStory: {}",
        kb.name,
        kb.founder,
        kb.co_founders.join(", "),
        kb.mission,
        kb.tagline,
        kb.story,
    );
    RetrievableDocument::new(DocumentKind::CompanyInfo, content, None)
}

fn employee_document(e: &Employee) -> RetrievableDocument {
    let content = format!(
        "Employee: {}\nRole: {}\nExpertise: {}",
        e.name, e.role, e.expertise
    );
    RetrievableDocument::new(DocumentKind::Employee, content, Some(e.name.clone()))
}

fn mission_document(m: &MissionArea) -> RetrievableDocument {
    let content = format!(
        "Mission area: {}\n{}\nTechnologies: {}",
        m.title,
        m.description,
        m.technologies.join(", ")
    );
    RetrievableDocument::new(DocumentKind::Mission, content, Some(m.title.clone()))
}

fn contact_document(c: &Contact) -> RetrievableDocument {
    let content = format!(
        "Contact information\nEmail: {}\nPhone: {}\nAddress: {}",
        c.email, c.phone, c.address
    );
    RetrievableDocument::new(DocumentKind::Contact, content, None)
}
