use std::collections::HashSet;

use thiserror::Error;

/// Canonical registro fields, in export order.
pub const REGISTRO_COLUMNS: [&str; 45] = [
    "id",
    "campanaID",
    "nameCamp",
    "startDateCamp",
    "endDateCamp",
    "responsibleCamp",
    "institutionCamp",
    "objectiveCamp",
    "region",
    "province",
    "commune",
    "locality",
    "stationName",
    "stationCode",
    "latitude",
    "longitude",
    "altitude",
    "datum",
    "utmZone",
    "utmEast",
    "utmNorth",
    "plotNumber",
    "plotArea",
    "plotShape",
    "slope",
    "aspect",
    "landUse",
    "vegetationType",
    "forestType",
    "canopyCover",
    "soilType",
    "soilDepth",
    "drainage",
    "erosion",
    "disturbance",
    "fireEvidence",
    "grazingEvidence",
    "weather",
    "temperature",
    "humidity",
    "observer",
    "recorder",
    "observations",
    "createdAt",
    "updatedAt",
];

/// Display label for every canonical registro field.
pub const REGISTRO_LABELS: [(&str, &str); 45] = [
    ("id", "ID"),
    ("campanaID", "ID de la campaña"),
    ("nameCamp", "Nombre de la campaña"),
    ("startDateCamp", "Fecha de inicio de la campaña"),
    ("endDateCamp", "Fecha de término de la campaña"),
    ("responsibleCamp", "Responsable de la campaña"),
    ("institutionCamp", "Institución"),
    ("objectiveCamp", "Objetivo de la campaña"),
    ("region", "Región"),
    ("province", "Provincia"),
    ("commune", "Comuna"),
    ("locality", "Localidad"),
    ("stationName", "Nombre de la estación"),
    ("stationCode", "Código de la estación"),
    ("latitude", "Latitud"),
    ("longitude", "Longitud"),
    ("altitude", "Altitud (m s.n.m.)"),
    ("datum", "Datum"),
    ("utmZone", "Zona UTM"),
    ("utmEast", "UTM Este"),
    ("utmNorth", "UTM Norte"),
    ("plotNumber", "Número de parcela"),
    ("plotArea", "Superficie de la parcela (m²)"),
    ("plotShape", "Forma de la parcela"),
    ("slope", "Pendiente (%)"),
    ("aspect", "Exposición"),
    ("landUse", "Uso de suelo"),
    ("vegetationType", "Tipo de vegetación"),
    ("forestType", "Tipo forestal"),
    ("canopyCover", "Cobertura de copas (%)"),
    ("soilType", "Tipo de suelo"),
    ("soilDepth", "Profundidad de suelo (cm)"),
    ("drainage", "Drenaje"),
    ("erosion", "Erosión"),
    ("disturbance", "Perturbación"),
    ("fireEvidence", "Evidencia de incendio"),
    ("grazingEvidence", "Evidencia de ganadería"),
    ("weather", "Condición climática"),
    ("temperature", "Temperatura (°C)"),
    ("humidity", "Humedad relativa (%)"),
    ("observer", "Observador"),
    ("recorder", "Registrador"),
    ("observations", "Observaciones"),
    ("createdAt", "Fecha de creación"),
    ("updatedAt", "Fecha de actualización"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column {0} is listed more than once")]
    DuplicateColumn(String),
    #[error("column {0} has more than one label")]
    DuplicateLabelKey(String),
    #[error("column {0} has no label")]
    MissingLabel(String),
    #[error("label given for unknown column {0}")]
    UnknownColumn(String),
    #[error("label {0} is used by more than one column")]
    DuplicateLabel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub label: String,
}

/// Ordered column list with a display label per column.
///
/// Construction checks that the label mapping covers exactly the listed
/// columns and that labels are unique, so renaming is always total and 1:1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<ColumnDef>,
}

impl ColumnSchema {
    pub fn new<C, K, L>(
        columns: impl IntoIterator<Item = C>,
        labels: impl IntoIterator<Item = (K, L)>,
    ) -> Result<Self, SchemaError>
    where
        C: Into<String>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if names.contains(&column) {
                return Err(SchemaError::DuplicateColumn(column));
            }
            names.push(column);
        }

        let mut mapping: Vec<(String, String)> = Vec::new();
        for (key, label) in labels {
            let key = key.into();
            if mapping.iter().any(|(k, _)| *k == key) {
                return Err(SchemaError::DuplicateLabelKey(key));
            }
            if !names.contains(&key) {
                return Err(SchemaError::UnknownColumn(key));
            }
            mapping.push((key, label.into()));
        }

        let mut seen_labels = HashSet::new();
        let mut defs = Vec::with_capacity(names.len());
        for name in names {
            let Some((_, label)) = mapping.iter().find(|(k, _)| *k == name) else {
                return Err(SchemaError::MissingLabel(name));
            };
            if !seen_labels.insert(label.clone()) {
                return Err(SchemaError::DuplicateLabel(label.clone()));
            }
            defs.push(ColumnDef {
                name,
                label: label.clone(),
            });
        }

        Ok(Self { columns: defs })
    }

    /// The 45-column registro sheet layout.
    pub fn registro() -> Result<Self, SchemaError> {
        Self::new(REGISTRO_COLUMNS, REGISTRO_LABELS)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn label_for(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
