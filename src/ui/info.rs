//! Static text and legend tables for the info panel.

use crate::core::{DataType, Year};

pub const FALLBACK_TITLE: &str = "Earth Data";
pub const FALLBACK_DESCRIPTION: &str = "NASA Terra MODIS";
pub const FALLBACK_STORY: &str = "Explore 24 years of data from NASA Terra.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub rgb: [u8; 3],
    pub label: &'static str,
}

const fn entry(hex: u32, label: &'static str) -> LegendEntry {
    LegendEntry {
        rgb: [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8],
        label,
    }
}

const LAND_LEGEND: [LegendEntry; 13] = [
    entry(0x006400, "Evergreen Needleleaf Forest"),
    entry(0x228B22, "Evergreen Broadleaf Forest"),
    entry(0x8FBC8F, "Deciduous Needleleaf Forest"),
    entry(0x32CD32, "Deciduous Broadleaf Forest"),
    entry(0x9ACD32, "Mixed Forest"),
    entry(0xFFFF00, "Grasslands"),
    entry(0xFFD700, "Savannas"),
    entry(0xDAA520, "Shrublands"),
    entry(0x8B4513, "Woody Savannas"),
    entry(0xA0522D, "Croplands"),
    entry(0xFF6347, "Urban Areas"),
    entry(0x0000FF, "Water Bodies"),
    entry(0xF5F5DC, "Barren Land"),
];

const BUMP_LEGEND: [LegendEntry; 5] = [
    entry(0x000080, "Deep Ocean (-4000m)"),
    entry(0x00FFFF, "Sea Level (0m)"),
    entry(0x00FF00, "Lowlands (500m)"),
    entry(0xFF8000, "Mountains (2000m)"),
    entry(0x800080, "Peaks (6000m+)"),
];

const ATMOSPHERE_LEGEND: [LegendEntry; 8] = [
    entry(0x000080, "Low Aerosol Density"),
    entry(0x0000FF, "Moderate Aerosol"),
    entry(0x00FFFF, "Normal Conditions"),
    entry(0x00FF00, "Elevated Particles"),
    entry(0xFFFF00, "High Aerosol"),
    entry(0xFF8000, "Very High Density"),
    entry(0xFF0000, "Extreme Conditions"),
    entry(0x800080, "Critical Levels"),
];

/// Legend heading and entries for a data type; the combined Earth view has none.
pub fn legend(data_type: DataType) -> Option<(&'static str, &'static [LegendEntry])> {
    match data_type {
        DataType::Earth => None,
        DataType::Land => Some(("Land Cover Legend", &LAND_LEGEND)),
        DataType::Bump => Some(("Surface Elevation Legend", &BUMP_LEGEND)),
        DataType::Atmosphere => Some(("Atmosphere Composition Legend", &ATMOSPHERE_LEGEND)),
    }
}

/// Entries the info panel draws right now.
pub fn visible_legend_entries(data_type: DataType, show_legend: bool) -> &'static [LegendEntry] {
    match legend(data_type) {
        Some((_, entries)) if show_legend => entries,
        _ => &[],
    }
}

pub struct DataTypeInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static str,
}

pub fn data_type_info(data_type: DataType) -> Option<DataTypeInfo> {
    match data_type {
        DataType::Earth => None,
        DataType::Land => Some(DataTypeInfo {
            title: "Land Cover Data",
            description: "MODIS MCD12Q1 Land Cover Type",
            details: "Shows vegetation types, urban areas, water bodies, and barren land",
        }),
        DataType::Bump => Some(DataTypeInfo {
            title: "Surface Bump Data",
            description: "Topographic Surface Elevation",
            details: "Displays terrain elevation and surface roughness",
        }),
        DataType::Atmosphere => Some(DataTypeInfo {
            title: "Atmosphere Data",
            description: "NASA Atmosphere Composition",
            details: "Shows atmospheric conditions and composition over time",
        }),
    }
}

pub fn title(data_type: DataType) -> &'static str {
    data_type_info(data_type).map_or(FALLBACK_TITLE, |info| info.title)
}

pub fn description(data_type: DataType) -> &'static str {
    data_type_info(data_type).map_or(FALLBACK_DESCRIPTION, |info| info.description)
}

pub fn year_story(year: Year) -> &'static str {
    match year.get() {
        2001 => "Terra satellite begins global land cover monitoring.",
        2002 => "First comprehensive global vegetation mapping.",
        2003 => "European heatwave impacts vegetation patterns.",
        2004 => "Asian tsunami affects coastal land cover.",
        2005 => "Hurricane Katrina reshapes Gulf Coast.",
        2006 => "Amazon deforestation reaches peak levels.",
        2007 => "Arctic ice melting accelerates.",
        2008 => "Global financial crisis slows urban expansion.",
        2009 => "Copenhagen Climate Summit raises awareness.",
        2010 => "Rapid urban expansion in Asia and Africa.",
        2011 => "Fukushima disaster affects regional land use.",
        2012 => "Drought impacts Great Plains agriculture.",
        2013 => "California wildfires increase in frequency.",
        2014 => "Paris Agreement negotiations begin.",
        2015 => "Paris Climate Agreement signed.",
        2016 => "El Niño affects global weather patterns.",
        2017 => "Hurricane Maria devastates Puerto Rico.",
        2018 => "California Camp Fire breaks records.",
        2019 => "Australian bushfires reach unprecedented scale.",
        2020 => "COVID-19 lockdowns reduce urban pollution.",
        2021 => "COP26 Glasgow Climate Summit.",
        2022 => "European heatwaves break temperature records.",
        2023 => "Global renewable energy adoption accelerates.",
        2024 => "Global reforestation efforts show early success.",
        _ => FALLBACK_STORY,
    }
}
