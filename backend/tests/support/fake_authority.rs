//! Loopback availability authority for adapter and end-to-end tests.
//!
//! Each request pops the next scripted reply; once the script runs out the
//! server answers `503`. Received JSON bodies are kept for assertions.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;
use url::Url;

/// One scripted authority reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<Reply>>,
    received: Mutex<Vec<Value>>,
}

async fn answer(script: web::Data<Script>, body: web::Json<Value>) -> HttpResponse {
    script
        .received
        .lock()
        .expect("received mutex")
        .push(body.into_inner());
    let reply = script.replies.lock().expect("replies mutex").pop_front();
    let Some(reply) = reply else {
        return HttpResponse::ServiceUnavailable().body("script exhausted");
    };
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).expect("valid scripted status");
    HttpResponse::build(status)
        .content_type("application/json")
        .body(reply.body)
}

/// Running fake authority bound to an ephemeral loopback port.
pub struct FakeAuthority {
    script: web::Data<Script>,
    addr: SocketAddr,
    handle: ServerHandle,
}

impl FakeAuthority {
    /// Start the server on the current Actix system and return once it is bound.
    pub fn start(replies: Vec<Reply>) -> Self {
        let script = web::Data::new(Script {
            replies: Mutex::new(replies.into()),
            received: Mutex::default(),
        });
        let app_script = script.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_script.clone())
                .route("/v1/availability", web::post().to(answer))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind loopback port");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        Self {
            script,
            addr,
            handle,
        }
    }

    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}/v1/availability", self.addr)).expect("valid endpoint")
    }

    pub fn calls(&self) -> usize {
        self.script.received.lock().expect("received mutex").len()
    }

    pub fn received(&self) -> Vec<Value> {
        self.script.received.lock().expect("received mutex").clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Endpoint on a port with no listener, for connection failures.
pub fn unreachable_endpoint() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    Url::parse(&format!("http://{addr}/v1/availability")).expect("valid endpoint")
}
