use crate::e2e::helpers;

use helpers::fixtures::{hello_world_pdf, MultipartForm};
use helpers::{TestContext, TestOptions};
use hyper::StatusCode;
use lumecast::domain::podcast::ConversionResponse;
use pretty_assertions::assert_eq;
use test_context::test_context;

fn audio_path(response: &ConversionResponse) -> &str {
    response
        .audio_url
        .as_deref()
        .expect("expected an audio url")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_convert_hello_world_with_offline_engine(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults().pdf(&hello_world_pdf());

    let response = ctx.client.post_form("/api/podcast", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body: ConversionResponse = response.json().unwrap();

    assert!(body.audio_url.is_some());
    assert!(audio_path(&body).ends_with(".wav"));
    assert!(body.transcript.contains("Focusing on: General content overview"));
    assert!(body.transcript.contains("## Main Content\nHello world\n"));
    assert!(!body.transcript.contains("Audio generation failed"));
    assert_eq!(body.status, "✅ Podcast generated successfully! 🎉");

    // Offline only: the networked endpoint is never called
    assert!(ctx.networked.requests().is_empty());
    assert_eq!(ctx.offline.calls().len(), 1);
    assert_eq!(ctx.offline.calls()[0].0, body.transcript);

    assert!(ctx.files_with_extension("pdf").is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_audio_once_and_then_delete_it(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults().pdf(&hello_world_pdf());
    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(ctx.files_with_extension("wav").len(), 1);

    let audio = ctx.client.get(audio_path(&body)).await.unwrap();
    audio
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");
    assert_eq!(audio.body_bytes, helpers::tts_mocks::mock_wav_bytes());
    assert!(ctx.files_with_extension("wav").is_empty());

    let again = ctx.client.get(audio_path(&body)).await.unwrap();
    again.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ask_for_a_pdf_when_none_is_uploaded(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/api/podcast", MultipartForm::podcast_defaults())
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body: ConversionResponse = response.json().unwrap();
    assert_eq!(body.audio_url, None);
    assert_eq!(body.transcript, "❌ Please upload a PDF file");
    assert_eq!(body.status, "Failed: Please upload a PDF file");
    assert!(ctx.offline.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_an_empty_file_as_missing(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults().pdf(b"");

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(body.status, "Failed: Please upload a PDF file");
    assert!(std::fs::read_dir(ctx.work_dir()).unwrap().next().is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unreadable_pdfs(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults().pdf(b"%PDF-1.4 this is not really a pdf");

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(body.audio_url, None);
    assert!(body
        .transcript
        .starts_with("❌ Error extracting text from PDF: "));
    assert!(!body.transcript.contains("# Podcast Script"));
    assert!(ctx.offline.calls().is_empty());
    assert!(ctx.files_with_extension("pdf").is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_networked_tts_with_mapped_language(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults()
        .text("language", "Spanish")
        .text("use_advanced_audio", "true")
        .pdf(&hello_world_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert!(audio_path(&body).ends_with(".mp3"));
    assert!(body.transcript.contains("**Language:** Spanish"));

    let codes = ctx.networked.language_codes();
    assert!(!codes.is_empty());
    assert!(codes.iter().all(|code| code == "es"), "codes: {:?}", codes);

    // The whole script was sent, chunk by chunk, in order
    let spoken: Vec<String> = ctx
        .networked
        .spoken_text()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let script: Vec<String> = body
        .transcript
        .split_whitespace()
        .map(str::to_string)
        .collect();
    assert_eq!(spoken, script);
    assert!(ctx.offline.calls().is_empty());

    let audio = ctx.client.get(audio_path(&body)).await.unwrap();
    audio
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg");
    let chunk_count = ctx.networked.requests().len();
    assert_eq!(
        audio.body_bytes.len(),
        chunk_count * helpers::tts_mocks::mock_mp3_bytes().len()
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_english_code_for_unknown_language(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults()
        .text("language", "Klingon")
        .text("use_advanced_audio", "true")
        .pdf(&hello_world_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert!(body.audio_url.is_some());
    assert!(body.transcript.contains("**Language:** Klingon"));
    assert!(ctx.networked.language_codes().iter().all(|code| code == "en"));
}

#[tokio::test]
async fn it_should_fall_back_to_offline_when_networked_fails() {
    let ctx = TestContext::with_options(TestOptions {
        networked_healthy: false,
        offline_healthy: true,
    })
    .await;
    let form = MultipartForm::podcast_defaults()
        .text("use_advanced_audio", "true")
        .pdf(&hello_world_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert!(audio_path(&body).ends_with(".wav"));
    assert_eq!(ctx.networked.requests().len(), 1);
    assert_eq!(ctx.offline.calls().len(), 1);
    assert!(ctx.files_with_extension("mp3").is_empty());
}

#[tokio::test]
async fn it_should_keep_the_script_when_no_backend_works() {
    let ctx = TestContext::with_options(TestOptions {
        networked_healthy: false,
        offline_healthy: false,
    })
    .await;
    let form = MultipartForm::podcast_defaults()
        .text("use_advanced_audio", "true")
        .text("question", "Greetings")
        .pdf(&hello_world_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(body.audio_url, None);
    assert!(body.transcript.starts_with("❌ # Podcast Script"));
    assert!(body.transcript.contains("Focusing on: Greetings"));
    assert!(body
        .transcript
        .ends_with("\n\n❌ Audio generation failed. Please try again."));
    assert!(body.status.starts_with("Failed: # Podcast Script"));
    assert!(std::fs::read_dir(ctx.work_dir()).unwrap().next().is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_tone(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults()
        .text("tone", "Sarcastic")
        .pdf(&hello_world_pdf());

    let response = ctx.client.post_form("/api/podcast", form).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unknown tone");
    assert!(ctx.offline.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_length(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults()
        .text("length", "Epic (2 hours)")
        .pdf(&hello_world_pdf());

    let response = ctx.client.post_form("/api/podcast", form).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unknown length");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_form_defaults_for_missing_fields(ctx: &TestContext) {
    let form = MultipartForm::new().pdf(&hello_world_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    // Networked TTS is on by default
    assert!(audio_path(&body).ends_with(".mp3"));
    assert!(body.transcript.contains("**Tone:** Fun"));
    assert!(body.transcript.contains("**Length:** Medium (3-5 min)"));
    assert!(body.transcript.contains("**Language:** English"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_serve_unknown_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/podcast/audio/podcast-doesnotexist.wav")
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .client
        .get("/api/podcast/audio/secrets.txt")
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_uploads_over_the_limit(ctx: &TestContext) {
    // The test router caps uploads at 1 MiB
    let oversized = vec![b'x'; 2 * 1024 * 1024];
    let form = MultipartForm::podcast_defaults().pdf(&oversized);

    let response = ctx.client.post_form("/api/podcast", form).await.unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("Payload too large");
    assert!(ctx.offline.calls().is_empty());
    assert!(ctx.files_with_extension("pdf").is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_pdfs_that_crash_the_parser(ctx: &TestContext) {
    let form = MultipartForm::podcast_defaults().pdf(&helpers::fixtures::mistyped_font_pdf());

    let body: ConversionResponse = ctx
        .client
        .post_form("/api/podcast", form)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(body.audio_url, None);
    assert!(
        body.transcript
            .starts_with("❌ Error extracting text from PDF: "),
        "transcript: {}",
        body.transcript
    );
    assert!(ctx.files_with_extension("pdf").is_empty());
}
