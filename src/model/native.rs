/// Local llama.cpp backend (behind the `native` cargo feature)
///
/// Loads a GGUF model from a user-picked path and streams a greedy decode
/// through the `TokenSender`. The model lives on its own resident thread
/// and never moves; requests arrive over a channel. Text-only for now: the
/// image is not projected into the context (no mmproj wiring yet), and
/// temperature/top-p are not applied — decoding is greedy.

use super::{CaptionModel, GenerationRequest, TokenSender, TokenStream};
use crate::error::CaptionError;
use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel};
use llama_cpp_2::token::data_array::LlamaTokenDataArray;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::mpsc::{self, Sender};

struct NativeRequest {
    prompt: String,
    max_new_tokens: u32,
    tokens: TokenSender,
}

pub struct NativeModel {
    tx: Sender<NativeRequest>,
}

impl NativeModel {
    pub fn load(model_path: &Path) -> Result<Self, CaptionError> {
        let backend = LlamaBackend::init()
            .map_err(|e| CaptionError::Generation(format!("llama backend init failed: {e}")))?;
        let model_params = LlamaModelParams::default();
        let model = LlamaModel::load_from_file(&backend, model_path, &model_params).map_err(
            |e| {
                CaptionError::Generation(format!(
                    "failed to load model {}: {e}",
                    model_path.display()
                ))
            },
        )?;

        println!("🧠 Model loaded: {}", model_path.display());

        let (tx, rx) = mpsc::channel::<NativeRequest>();

        // The model stays on this thread for its whole lifetime
        std::thread::spawn(move || {
            while let Ok(request) = rx.recv() {
                if let Err(message) = decode(&backend, &model, &request) {
                    request.tokens.fail(message);
                }
            }
        });

        Ok(NativeModel { tx })
    }
}

impl CaptionModel for NativeModel {
    fn start_generation(&self, request: GenerationRequest) -> Result<TokenStream, CaptionError> {
        let (tokens, stream) = TokenStream::channel();
        let prompt = chat_prompt(&request.system_prompt, &request.prompt);
        self.tx
            .send(NativeRequest {
                prompt,
                max_new_tokens: request.params.max_new_tokens,
                tokens,
            })
            .map_err(|_| CaptionError::Generation("model thread is gone".to_string()))?;
        Ok(stream)
    }
}

fn chat_prompt(system: &str, user: &str) -> String {
    format!(
        "<|im_start|>system\n{system}<|im_end|>\n<|im_start|>user\n{user}<|im_end|>\n<|im_start|>assistant\n"
    )
}

fn decode(backend: &LlamaBackend, model: &LlamaModel, request: &NativeRequest) -> Result<(), String> {
    let ctx_params = LlamaContextParams::default()
        .with_n_ctx(NonZeroU32::new(model.n_ctx_train() as u32))
        .with_n_batch(model.n_ctx_train() as u32);

    let mut ctx = model
        .new_context(backend, ctx_params)
        .map_err(|e| format!("failed to create context: {e}"))?;

    let tokens_list = model
        .str_to_token(&request.prompt, AddBos::Always)
        .map_err(|e| format!("failed to tokenize prompt: {e}"))?;

    let n_len = model.n_ctx_train() as i32;

    let mut batch = LlamaBatch::new(model.n_ctx_train() as usize, 1);
    let last_index: i32 = (tokens_list.len() - 1) as i32;
    for (i, token) in (0_i32..).zip(tokens_list.into_iter()) {
        // llama_decode outputs logits only for the last token of the prompt
        let is_last = i == last_index;
        batch
            .add(token, i, &[0], is_last)
            .map_err(|e| format!("failed to add token: {e}"))?;
    }

    ctx.decode(&mut batch)
        .map_err(|e| format!("failed to decode prompt: {e}"))?;

    let mut n_cur = batch.n_tokens();
    let mut produced: u32 = 0;

    while n_cur <= n_len && produced < request.max_new_tokens {
        {
            let candidates = ctx.candidates_ith(batch.n_tokens() - 1);
            let candidates_p = LlamaTokenDataArray::from_iter(candidates, false);
            let new_token_id = ctx.sample_token_greedy(candidates_p);

            if new_token_id == model.token_eos() {
                break;
            }

            match model.token_to_str(new_token_id) {
                Ok(piece) => {
                    if !request.tokens.send(piece) {
                        // Consumer dropped the stream: cooperative stop
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("⚠️  could not render token {new_token_id}: {e}");
                }
            }
            produced += 1;

            batch.clear();
            batch
                .add(new_token_id, n_cur, &[0], true)
                .map_err(|e| format!("failed to add token: {e}"))?;
        }
        n_cur += 1;

        ctx.decode(&mut batch)
            .map_err(|e| format!("failed to decode batch: {e}"))?;
    }

    Ok(())
}
