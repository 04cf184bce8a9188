// Licenses recognised in ISO use-limitation text
use crate::model::License;

pub struct KnownLicense {
    /// Exact use-limitation text that denotes this license
    pub label: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub spdx_url: &'static str,
}

impl KnownLicense {
    pub fn to_license(&self) -> License {
        License {
            name: self.name.to_string(),
            url: self.url.to_string(),
            spdx_url: self.spdx_url.to_string(),
        }
    }
}

pub const CC_BY_4: KnownLicense = KnownLicense {
    label: "Creative Commons CC-BY 4.0",
    name: "Creative Commons Attribution 4.0 International",
    url: "https://creativecommons.org/licenses/by/4.0/legalcode",
    spdx_url: "https://spdx.org/licenses/CC-BY-4.0",
};

pub const CC_BY_NC_4: KnownLicense = KnownLicense {
    label: "Creative Commons CC-BY-NC 4.0",
    name: "Creative Commons Attribution Non Commercial 4.0 International",
    url: "https://creativecommons.org/licenses/by-nc/4.0/legalcode",
    spdx_url: "https://spdx.org/licenses/CC-BY-NC-4.0",
};

pub const CC_BY_ND_4: KnownLicense = KnownLicense {
    label: "Creative Commons CC-BY-ND 4.0",
    name: "Creative Commons Attribution No Derivatives 4.0 International",
    url: "https://creativecommons.org/licenses/by-nd/4.0/legalcode",
    spdx_url: "https://spdx.org/licenses/CC-BY-ND-4.0",
};

pub const CC_BY_3: KnownLicense = KnownLicense {
    label: "Creative Commons CC-BY 3.0",
    name: "Creative Commons Attribution 3.0 Unported",
    url: "https://creativecommons.org/licenses/by/3.0/legalcode",
    spdx_url: "https://spdx.org/licenses/CC-BY-3.0",
};

pub const KNOWN_LICENSES: &[KnownLicense] = &[CC_BY_4, CC_BY_NC_4, CC_BY_ND_4, CC_BY_3];

/// Exact, case-sensitive label lookup
pub fn match_label(text: &str) -> Option<License> {
    KNOWN_LICENSES
        .iter()
        .find(|known| known.label == text)
        .map(KnownLicense::to_license)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_cc_by() {
        let license = match_label("Creative Commons CC-BY 4.0").unwrap();
        assert_eq!(license.spdx_url, "https://spdx.org/licenses/CC-BY-4.0");
        assert_eq!(license.url, "https://creativecommons.org/licenses/by/4.0/legalcode");
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert!(match_label("creative commons cc-by 4.0").is_none());
        assert!(match_label("Creative Commons CC-BY 4.0 ").is_none());
        assert!(match_label("Not for navigation").is_none());
    }
}
