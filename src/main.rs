use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use jobmatch_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, cors},
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    sqlx::query(
        "INSERT INTO roles (id, name) VALUES (1, 'job_seeker'), (2, 'employer')
         ON CONFLICT (id) DO NOTHING",
    )
    .execute(&pool)
    .await?;

    let app_state = AppState::new(pool)?;

    {
        let otp_service = app_state.otp_service.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                match otp_service.cleanup_expired().await {
                    Ok(0) => {}
                    Ok(n) => tracing::debug!(removed = n, "swept expired OTP codes"),
                    Err(e) => tracing::error!(error = ?e, "OTP sweep failed"),
                }
            }
        });
    }

    let public_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/verifyOtp/:user_id", post(routes::auth::verify_otp))
        .route("/auth/resendOtp/:user_id", post(routes::auth::resend_otp));

    let seeker_routes = Router::new()
        .route("/jobs/apply/:job_id", post(routes::jobs::apply_job))
        .route("/jobs/getApplications", get(routes::jobs::get_user_applications))
        .route("/jobs/myInterviews", get(routes::jobs::my_interviews))
        .route(
            "/jobs/path",
            post(routes::jobs::create_learning_path)
                .get(routes::jobs::get_learning_path)
                .delete(routes::jobs::delete_learning_path),
        )
        .route_layer(axum::middleware::from_fn(auth::require_job_seeker));

    let employer_routes = Router::new()
        .route("/jobs/create", post(routes::jobs::create_job))
        .route("/jobs/JobPost", get(routes::jobs::recruiter_jobs))
        .route("/jobs/:job_id/applicant", get(routes::jobs::job_applicants))
        .route(
            "/jobs/:application_id/status",
            patch(routes::jobs::update_application_status),
        )
        .route("/jobs/createInterview", post(routes::jobs::create_interview))
        .route("/jobs/upcomingInterview", get(routes::jobs::upcoming_interviews))
        .route("/jobs/updateInterview", patch(routes::jobs::update_interview))
        .route("/jobs/cancel/:interview_id", delete(routes::jobs::cancel_interview))
        .route("/jobs/ask", post(routes::jobs::ask_assistant))
        .route_layer(axum::middleware::from_fn(auth::require_employer));

    // Deletion is open to both sides; the service decides who may remove
    // which application.
    let shared_routes = Router::new()
        .route("/auth/verify", get(routes::auth::verify_session))
        .route("/jobs/getAll", get(routes::jobs::get_jobs))
        .route(
            "/jobs/application/:application_id",
            delete(routes::jobs::delete_application),
        )
        .route("/user/info", get(routes::users::user_info))
        .route("/user/update", patch(routes::users::update_user));

    let protected_routes = seeker_routes
        .merge(employer_routes)
        .merge(shared_routes)
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth::authenticate,
        ));

    let app = public_routes
        .merge(protected_routes)
        .with_state(app_state)
        .layer(cors::cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
