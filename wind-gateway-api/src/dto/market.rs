use serde::{Deserialize, Serialize};
use wind_gateway_core::{parse_date, split_list, CoreError, DataType, Frequency, Query};

pub const DEFAULT_DATA_FIELDS: &str = "close";
pub const DEFAULT_REALTIME_FIELDS: &str = "last,volume,amt,bid1,ask1";
/// Shenwan level-1 industry index used when no sector is named.
pub const DEFAULT_SECTOR: &str = "801010.SI";
pub const DEFAULT_SECTOR_FIELDS: &str = "close,pct_chg";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    #[serde(default)]
    pub codes: String,
    pub fields: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub frequency: Option<String>,
    pub data_type: Option<String>,
}

impl DataRequest {
    pub fn into_query(self) -> Result<Query, CoreError> {
        let fields = self.fields.as_deref().unwrap_or(DEFAULT_DATA_FIELDS);
        let frequency = match self.frequency.as_deref() {
            Some(raw) => raw.parse()?,
            None => Frequency::default(),
        };
        let data_type = match self.data_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => DataType::default(),
        };

        Ok(Query::snapshot(split_list(&self.codes), split_list(fields))
            .with_range(
                parse_date(self.start_date.as_deref())?,
                parse_date(self.end_date.as_deref())?,
            )
            .with_frequency(frequency)
            .with_data_type(data_type))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealtimeRequest {
    #[serde(default)]
    pub codes: String,
    pub fields: Option<String>,
}

impl RealtimeRequest {
    pub fn into_query(self) -> Query {
        let fields = self.fields.as_deref().unwrap_or(DEFAULT_REALTIME_FIELDS);
        Query::snapshot(split_list(&self.codes), split_list(fields))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorRequest {
    pub sector: Option<String>,
    pub fields: Option<String>,
}

impl SectorRequest {
    pub fn into_query(self) -> Query {
        let sector = self.sector.as_deref().unwrap_or(DEFAULT_SECTOR);
        let fields = self.fields.as_deref().unwrap_or(DEFAULT_SECTOR_FIELDS);
        Query::snapshot(split_list(sector), split_list(fields))
    }
}
