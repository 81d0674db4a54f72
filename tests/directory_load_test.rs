use doctor_directory::{
    ConsultationMode, DirectoryError, DirectoryLoader, DirectorySource, HttpDirectorySource,
    Phase, SortKey,
};
use httpmock::prelude::*;

fn listing_body() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "111",
            "name": "Dr. Asha Rao",
            "specialities": [{"name": "Dentist"}],
            "experience": "13 Years of experience",
            "fees": "₹ 500",
            "video_consult": true,
            "in_clinic": true,
            "photo": "https://example.com/asha.jpg",
            "doctor_introduction": "MBBS, Dental surgeon",
            "languages": ["English", "Hindi"],
            "clinic": {"address": {"locality": "Koramangala"}}
        },
        {
            "id": "112",
            "name": "Dr. Beena Shah",
            "specialities": [{"name": "Gynaecologist and Obstetrician"}],
            "experience": "7 Years of experience",
            "fees": "₹ 300",
            "video_consult": true,
            "in_clinic": false
        },
        {
            // Deliberately broken record: must normalize, not fail.
            "experience": "Not specified",
            "fees": "free consultation"
        }
    ])
}

#[tokio::test]
async fn test_end_to_end_load_and_browse() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/listing.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(listing_body());
    });

    let loader = DirectoryLoader::new(HttpDirectorySource::new(server.url("/listing.json")));
    let mut session = loader.load(None).await.unwrap();

    api_mock.assert();
    assert_eq!(session.results().len(), 3);

    // The malformed record got every default.
    let fallback = &session.results()[2];
    assert_eq!(fallback.name, "Unknown Doctor");
    assert_eq!(fallback.experience_years, 0);
    assert_eq!(fallback.consultation_fee, 0);
    assert_eq!(fallback.specialties, vec!["General Physician"]);

    // Alias folding reached the filter vocabulary.
    assert_eq!(
        session.specialty_options(),
        ["Dentist", "General Physician", "Gynaecologist"]
    );

    // Browse: in-clinic only, then sort by fees.
    session.toggle_consultation(ConsultationMode::InClinic);
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].name, "Dr. Asha Rao");

    session.toggle_consultation(ConsultationMode::InClinic);
    session.toggle_sort(SortKey::Fees);
    let fees: Vec<u32> = session.results().iter().map(|p| p.consultation_fee).collect();
    assert_eq!(fees, vec![0, 300, 500]);
    assert_eq!(session.address(), "sort=fees");
}

#[tokio::test]
async fn test_load_hydrates_from_initial_address() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/listing.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(listing_body());
    });

    let loader = DirectoryLoader::new(HttpDirectorySource::new(server.url("/listing.json")));
    let session = loader
        .load(Some("?search=rao&consultation=Video+Consult"))
        .await
        .unwrap();

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].name, "Dr. Asha Rao");
    assert_eq!(session.query().consultation, Some(ConsultationMode::VideoConsult));
}

#[tokio::test]
async fn test_wrapped_payload_is_unwrapped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "meta": {"total": 1},
                "data": [{"name": "Dr. Wrapped"}]
            }));
    });

    let loader = DirectoryLoader::new(HttpDirectorySource::new(server.url("/")));
    let session = loader.load(None).await.unwrap();
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].name, "Dr. Wrapped");
}

#[tokio::test]
async fn test_retry_is_a_fresh_fetch() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(502);
    });

    let loader = DirectoryLoader::new(HttpDirectorySource::new(server.url("/")));
    let err = loader.load(None).await.unwrap_err();
    assert!(matches!(err, DirectoryError::EndpointStatusError { status: 502 }));
    assert!(err.is_fetch_failure());

    // The endpoint recovers; the caller-initiated retry succeeds
    // independently of the first attempt.
    failing.delete();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(listing_body());
    });

    let session = loader.load(None).await.unwrap();
    assert_eq!(session.results().len(), 3);
    assert_eq!(session.view().phase, Phase::Ready);
}

#[tokio::test]
async fn test_non_json_body_is_a_fetch_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>maintenance</html>");
    });

    let source = HttpDirectorySource::new(server.url("/"));
    let err = source.fetch().await.unwrap_err();
    assert!(err.is_fetch_failure());
}
