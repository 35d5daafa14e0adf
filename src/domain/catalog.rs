//! Indicator code → display name resolution.
//!
//! World Bank International Debt Statistics identify each series by a short
//! code (`DT.DOD.DECT.CD`). The dashboard always works with display names, so
//! every record is resolved once at load time.

use std::collections::HashMap;

/// Built-in World Bank IDS codes known to the dashboard.
const WORLD_BANK_INDICATORS: &[(&str, &str)] = &[
    // External sector
    ("BM.GSR.TOTL.CD", "Balance of payments, current account, goods, services and primary income (BoP, US$)"),
    ("BN.CAB.XOKA.CD", "Current account balance (BoP, US$)"),
    ("BX.GSR.TOTL.CD", "Exports of goods and services (BoP, US$)"),
    ("BX.TRF.PWKR.CD.DT", "Personal remittances, received (US$)"),
    // FDI & portfolio
    ("BX.KLT.DINV.CD.WD", "Foreign direct investment, net inflows (US$)"),
    ("BX.PEF.TOTL.CD.WD", "Portfolio equity, net inflows (US$)"),
    // Debt stocks
    ("DT.DOD.DECT.CD", "External debt stocks, total (US$)"),
    ("DT.DOD.DECT.GN.ZS", "External debt stocks (% of GNI)"),
    ("DT.DOD.DIMF.CD", "Use of IMF credit (US$)"),
    ("DT.DOD.DLXF.CD", "Long-term external debt (US$)"),
    ("DT.DOD.DPNG.CD", "Multilateral debt (US$)"),
    ("DT.DOD.DPPG.CD", "Public and publicly guaranteed debt (US$)"),
    ("DT.DOD.DSTC.CD", "Short-term debt (US$)"),
    ("DT.DOD.DSTC.ZS", "Short-term debt (% of total external debt)"),
    ("DT.DOD.DSTC.XP.ZS", "Short-term debt (% of exports)"),
    ("DT.DOD.DSTC.IR.ZS", "Short-term debt (% of international reserves)"),
    ("DT.DOD.MIBR.CD", "IBRD loans and IDA credits (US$)"),
    ("DT.DOD.MIDA.CD", "IDA total (US$)"),
    ("DT.DOD.MWBG.CD", "World Bank debt outstanding (US$)"),
    ("DT.DOD.PVLX.CD", "Present value of external debt (US$)"),
    ("DT.DOD.PVLX.EX.ZS", "Present value of external debt (% of exports of goods and services)"),
    // Debt service
    ("DT.TDS.DIMF.CD", "Debt service paid to IMF (US$)"),
    ("DT.TDS.DPPF.XP.ZS", "Public and publicly guaranteed debt service (% of exports)"),
    ("DT.TDS.DPPG.CD", "Public and publicly guaranteed debt service (US$)"),
    ("DT.TDS.DPPG.GN.ZS", "Public and publicly guaranteed debt service (% of GNI)"),
    ("DT.TDS.DPPG.XP.ZS", "Public and publicly guaranteed debt service (% of exports)"),
    ("DT.TDS.MLAT.CD", "Multilateral debt service (US$)"),
    ("DT.TDS.MLAT.PG.ZS", "Multilateral debt service (% of government revenue)"),
    ("DT.TDS.DECT.CD", "Total debt service, external (US$)"),
    ("DT.TDS.DECT.EX.ZS", "Total debt service (% of exports of goods and services)"),
    ("DT.TDS.DECT.GN.ZS", "Total debt service (% of GNI)"),
    // Debt liabilities
    ("DT.NFL.BLAT.CD", "Debt liabilities, total (US$)"),
    ("DT.NFL.BOND.CD", "Bond debt, total (US$)"),
    ("DT.NFL.DPNG.CD", "Multilateral debt liabilities (US$)"),
    ("DT.NFL.IMFN.CD", "IMF debt liabilities (US$)"),
    ("DT.NFL.MIBR.CD", "IBRD loans (US$)"),
    ("DT.NFL.MIDA.CD", "IDA credits (US$)"),
    ("DT.NFL.MLAT.CD", "Multilateral debt liabilities (US$)"),
    ("DT.NFL.MOTH.CD", "Other debt liabilities (US$)"),
    ("DT.NFL.NIFC.CD", "Not included in foreign currency debt (US$)"),
    ("DT.NFL.OFFT.CD", "Official creditors (US$)"),
    ("DT.NFL.PBND.CD", "Public bonds (US$)"),
    ("DT.NFL.PCBK.CD", "Public commercial bank debt (US$)"),
    ("DT.NFL.PCBO.CD", "Other public bank debt (US$)"),
    ("DT.NFL.PROP.CD", "Private sector debt, other (US$)"),
    ("DT.NFL.PRVT.CD", "Private debt (US$)"),
    ("DT.NFL.PNGB.CD", "Private non-guaranteed bonds (US$)"),
    ("DT.NFL.PNGC.CD", "Private non-guaranteed commercial debt (US$)"),
    // Grants / ODA
    ("BX.GRT.EXTA.CD.WD", "Grants (excluding technical cooperation, US$)"),
    ("BX.GRT.TECH.CD.WD", "Grants (technical cooperation, US$)"),
    ("DT.ODA.ODAT.CD", "Official Development Assistance, total (US$)"),
    ("DT.ODA.ODAT.GN.ZS", "Official Development Assistance (% of GNI)"),
    ("DT.ODA.ODAT.PC.ZS", "Official Development Assistance per capita (US$)"),
    // Financial / reserves
    ("FI.RES.TOTL.DT.ZS", "Total reserves (% of total external debt)"),
    ("FI.RES.TOTL.MO", "Total reserves in months of imports"),
    ("FI.RES.TOTL.CD", "Total reserves (US$)"),
    // GNP
    ("NY.GNP.MKTP.CD", "Gross National Product (current US$)"),
];

/// Immutable code → name mapping.
#[derive(Debug, Clone, Default)]
pub struct IndicatorCatalog {
    names: HashMap<String, String>,
}

impl IndicatorCatalog {
    /// The built-in World Bank catalog.
    pub fn world_bank() -> Self {
        Self::from_pairs(WORLD_BANK_INDICATORS.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        }
    }

    /// Display name for `code`, or `code` itself when the catalog doesn't know it.
    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_pass_through() {
        let catalog = IndicatorCatalog::world_bank();
        for code in ["", "XX.UNKNOWN", "dt.dod.dect.cd", "External debt stocks, total (US$)"] {
            assert_eq!(catalog.resolve(code), code);
        }
    }

    #[test]
    fn known_codes_resolve_to_catalog_names() {
        let catalog = IndicatorCatalog::world_bank();
        for (code, name) in WORLD_BANK_INDICATORS {
            assert_eq!(catalog.resolve(code), *name);
        }
        assert_eq!(catalog.resolve("DT.DOD.DECT.CD"), "External debt stocks, total (US$)");
    }

    #[test]
    fn world_bank_catalog_has_every_code() {
        assert_eq!(IndicatorCatalog::world_bank().len(), WORLD_BANK_INDICATORS.len());
        assert!(IndicatorCatalog::default().is_empty());
    }

    #[test]
    fn custom_catalog() {
        let catalog = IndicatorCatalog::from_pairs([("A", "Alpha")]);
        assert_eq!(catalog.resolve("A"), "Alpha");
        assert_eq!(catalog.resolve("B"), "B");
    }
}
