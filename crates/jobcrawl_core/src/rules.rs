use std::fmt;
use std::str::FromStr;

/// The closed set of listing sites the crawler knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    JobsBg,
    Olx,
    Yox,
    RabotniMesta,
}

impl SiteId {
    pub const ALL: [SiteId; 4] = [
        SiteId::JobsBg,
        SiteId::Olx,
        SiteId::Yox,
        SiteId::RabotniMesta,
    ];

    /// Name used for this site in configuration and in [`crate::SiteEntry::name`].
    pub fn name(self) -> &'static str {
        match self {
            SiteId::JobsBg => "JOBS.BG",
            SiteId::Olx => "OLX",
            SiteId::Yox => "Yox",
            SiteId::RabotniMesta => "RabotniMesta",
        }
    }

    pub fn rules(self) -> ExtractionRules {
        match self {
            SiteId::JobsBg => ExtractionRules {
                title: r#"h2[class*="job-view-title"]"#,
                job_link: r#"a[href^="https://www.jobs.bg/job/"]"#,
                next_page: "",
            },
            SiteId::Olx => ExtractionRules {
                title: r#"h1[class*="css-tcqyb"]"#,
                job_link: r#"a[href^="https://www.olx.bg/ad/job/"]"#,
                next_page: r#"li > a[href*="/rabota/?page="]"#,
            },
            SiteId::Yox => ExtractionRules {
                title: r#"h1[data-job-component*="title"]"#,
                job_link: r#"a[href^="https://yox.bg/jobs/"]"#,
                next_page: r#"a[href*="/search?o="]"#,
            },
            SiteId::RabotniMesta => ExtractionRules {
                title: r#"h3[class*="title"]"#,
                job_link: r#"a[href*="/обява/"]"#,
                next_page: r#"a[href*="/работа/?&p="]"#,
            },
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown site identifier {0:?}")]
pub struct UnknownSite(pub String);

impl FromStr for SiteId {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| UnknownSite(s.to_string()))
    }
}

/// CSS selector patterns used to read one site.
///
/// An empty pattern selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionRules {
    /// Selects the job title on a job page.
    pub title: &'static str,
    /// Selects links to job pages on a listing page.
    pub job_link: &'static str,
    /// Selects links to further listing pages.
    pub next_page: &'static str,
}

impl ExtractionRules {
    pub const EMPTY: ExtractionRules = ExtractionRules {
        title: "",
        job_link: "",
        next_page: "",
    };
}

/// Looks up the extraction rules for a site name. Unknown names get
/// [`ExtractionRules::EMPTY`].
pub fn rules_for(site_name: &str) -> ExtractionRules {
    site_name
        .parse::<SiteId>()
        .map(SiteId::rules)
        .unwrap_or(ExtractionRules::EMPTY)
}
