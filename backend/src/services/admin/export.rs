//! `GET /api/admin/churches/export`: the published directory as CSV.
//!
//! The file starts with a UTF-8 BOM so spreadsheet tools pick the right
//! encoding, is comma-delimited, and quotes any field holding a comma, quote
//! or line break (inner quotes doubled). An empty directory answers `404`.

use crate::auth::require_admin;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::church::Church;

const BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADERS: [&str; 11] = [
    "jurisdiction",
    "name",
    "address",
    "schedule",
    "description",
    "pastors",
    "email",
    "website",
    "instagram",
    "youtube",
    "spotify",
];

pub(crate) async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match export_churches(&req, &state).await {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"igrejas.csv\"",
            ))
            .body(body),
        Err(e) => e.error_response(),
    }
}

async fn export_churches(req: &HttpRequest, state: &AppState) -> AppResult<Vec<u8>> {
    require_admin(state.identity.as_ref(), req)?;
    let churches = state.store.list_churches().await?;
    if churches.is_empty() {
        return Err(AppError::NotFound("Registro".to_string()));
    }
    encode_csv(&churches)
}

fn csv_error(e: impl std::fmt::Display) -> AppError {
    AppError::Persistence(format!("csv encoding failed: {}", e))
}

pub(crate) fn encode_csv(churches: &[Church]) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(BOM.to_vec());
    writer.write_record(HEADERS).map_err(csv_error)?;

    for church in churches {
        let d = &church.details;
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        writer
            .write_record([
                d.jurisdiction.clone(),
                d.name.clone(),
                d.address.clone(),
                opt(&d.schedule),
                opt(&d.description),
                opt(&d.pastors),
                d.responsible_email.clone(),
                opt(&d.website),
                opt(&d.instagram),
                opt(&d.youtube),
                opt(&d.spotify),
            ])
            .map_err(csv_error)?;
    }
    writer.into_inner().map_err(csv_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::submission::NewSubmission;

    fn church(name: &str, address: &str, schedule: Option<&str>) -> Church {
        Church {
            id: "c-1".into(),
            submission_id: None,
            details: NewSubmission {
                jurisdiction: "IEAB".into(),
                name: name.into(),
                address: address.into(),
                schedule: schedule.map(Into::into),
                description: None,
                pastors: None,
                responsible_email: "sec@igreja.org".into(),
                website: None,
                instagram: None,
                youtube: None,
                spotify: None,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn starts_with_bom_and_header() {
        let out = encode_csv(&[church("Catedral", "Rua A", None)]).unwrap();
        assert!(out.starts_with(BOM));
        let text = String::from_utf8(out[BOM.len()..].to_vec()).unwrap();
        assert!(text.starts_with("jurisdiction,name,address,schedule,"));
        assert!(text.contains("IEAB,Catedral,Rua A,,"));
    }

    #[test]
    fn quotes_commas_quotes_and_newlines() {
        let out = encode_csv(&[church(
            "Igreja \"Bom Pastor\"",
            "Rua X, 12",
            Some("Dom 10h\nQua 19h"),
        )])
        .unwrap();
        let text = String::from_utf8(out[BOM.len()..].to_vec()).unwrap();
        assert!(text.contains("\"Igreja \"\"Bom Pastor\"\"\""));
        assert!(text.contains("\"Rua X, 12\""));
        assert!(text.contains("\"Dom 10h\nQua 19h\""));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Igreja \"Bom Pastor\"");
        assert_eq!(&record[2], "Rua X, 12");
        assert_eq!(&record[3], "Dom 10h\nQua 19h");
    }
}
