//! CRUD verb dispatch against a handler/datastore pair.
//!
//! One dispatcher instance serves one resource: it is built from a concrete
//! [`RestHandler`] (which fixes the model type and optional hooks) and a
//! [`Datastore`] for that model. Each verb entry point resolves the target
//! record(s), applies authorization, runs the codec, and produces a
//! [`RestResponse`]; every error anywhere in the sequence is logged and
//! converted into a 400 response. Nothing propagates past the entry points.

use crate::codec::{apply_jsonable, to_jsonable};
use crate::datastore::Datastore;
use crate::error::{RestError, RestResult};
use crate::handler::{ListQuery, RequestContext, RestHandler};
use crate::meta::model_meta;
use crate::model::Model;
use crate::response::RestResponse;
use serde_json::Value;

/// Path segment that selects schema output instead of a record.
const META_SEGMENT: &str = "meta";

/// Outcome of resolving a record by id.
///
/// Unauthorized is kept distinct from NotFound internally (and for tests),
/// but both normalize to the same 404 empty response so authorization
/// failures don't leak record existence.
#[derive(Debug)]
pub(crate) enum Lookup<M> {
    Found(M),
    NotFound,
    Unauthorized,
}

/// Verb dispatcher for one resource.
pub struct RestDispatcher<H, D> {
    handler: H,
    datastore: D,
}

impl<H, D> RestDispatcher<H, D>
where
    H: RestHandler,
    D: Datastore<H::Model>,
{
    /// Build a dispatcher from its collaborators.
    pub fn new(handler: H, datastore: D) -> Self {
        Self { handler, datastore }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn datastore(&self) -> &D {
        &self.datastore
    }

    /// `GET /{resource}`, `GET /{resource}/{id}`, `GET /{resource}/meta`.
    pub async fn get(
        &self,
        resource: &str,
        arg: Option<&str>,
        context: &RequestContext,
    ) -> RestResponse {
        log::debug!(
            "GET {resource} arg={arg:?} (request: '{}')",
            context.request_id
        );
        self.try_get(arg, context)
            .await
            .unwrap_or_else(|e| self.fail(resource, "GET", e, context))
    }

    /// `PUT /{resource}/{id}` with a JSON body.
    pub async fn put(
        &self,
        resource: &str,
        arg: Option<&str>,
        body: &str,
        context: &RequestContext,
    ) -> RestResponse {
        log::debug!(
            "PUT {resource} arg={arg:?} (request: '{}')",
            context.request_id
        );
        self.try_put(arg, body, context)
            .await
            .unwrap_or_else(|e| self.fail(resource, "PUT", e, context))
    }

    /// `POST /{resource}` with a JSON body.
    pub async fn post(
        &self,
        resource: &str,
        arg: Option<&str>,
        body: &str,
        context: &RequestContext,
    ) -> RestResponse {
        log::debug!(
            "POST {resource} arg={arg:?} (request: '{}')",
            context.request_id
        );
        self.try_post(arg, body, context)
            .await
            .unwrap_or_else(|e| self.fail(resource, "POST", e, context))
    }

    /// `DELETE /{resource}/{id}`.
    pub async fn delete(
        &self,
        resource: &str,
        arg: Option<&str>,
        context: &RequestContext,
    ) -> RestResponse {
        log::debug!(
            "DELETE {resource} arg={arg:?} (request: '{}')",
            context.request_id
        );
        self.try_delete(arg, context)
            .await
            .unwrap_or_else(|e| self.fail(resource, "DELETE", e, context))
    }

    async fn try_get(&self, arg: Option<&str>, context: &RequestContext) -> RestResult<RestResponse> {
        let template = self.handler.template();

        match arg {
            Some(META_SEGMENT) => {
                // Schema output ignores authorization.
                let meta = model_meta::<H::Model>(template.as_ref())?;
                Ok(RestResponse::json(&meta)?)
            }
            Some(arg) => {
                let id = parse_id(arg)?;
                match self.lookup(id, context).await? {
                    Lookup::Found(model) => {
                        let jsonable = to_jsonable(&model, template.as_ref())?;
                        Ok(RestResponse::json(&jsonable)?)
                    }
                    Lookup::NotFound | Lookup::Unauthorized => Ok(RestResponse::not_found()),
                }
            }
            None => {
                let query = self.handler.modify_query(ListQuery::new(), context);
                let records = self
                    .datastore
                    .query(&query)
                    .await
                    .map_err(datastore_error)?;
                let mut results = Vec::with_capacity(records.len());
                for model in records {
                    if self.handler.is_authorized(&model, context) {
                        results.push(to_jsonable(&model, template.as_ref())?);
                    }
                }
                Ok(RestResponse::json(&Value::Array(results))?)
            }
        }
    }

    async fn try_put(
        &self,
        arg: Option<&str>,
        body: &str,
        context: &RequestContext,
    ) -> RestResult<RestResponse> {
        let template = self.handler.template();
        let arg = arg.ok_or(RestError::MissingId)?;
        let id = parse_id(arg)?;
        // Parse the body before touching the datastore so malformed JSON
        // fails the same way whether or not the record exists.
        let incoming: Value = serde_json::from_str(body)?;

        match self.lookup(id, context).await? {
            Lookup::Found(model) => {
                let (save, delete) = apply_jsonable(Some(&incoming), model, template.as_ref())?;
                self.commit_and_respond(save, delete, template.as_ref()).await
            }
            Lookup::NotFound | Lookup::Unauthorized => Ok(RestResponse::not_found()),
        }
    }

    async fn try_post(
        &self,
        arg: Option<&str>,
        body: &str,
        _context: &RequestContext,
    ) -> RestResult<RestResponse> {
        if arg.is_some() {
            return Err(RestError::ArgumentNotAllowed);
        }
        let template = self.handler.template();
        let incoming: Value = serde_json::from_str(body)?;

        let model = H::Model::default();
        let (save, delete) = apply_jsonable(Some(&incoming), model, template.as_ref())?;
        self.commit_and_respond(save, delete, template.as_ref()).await
    }

    async fn try_delete(
        &self,
        arg: Option<&str>,
        context: &RequestContext,
    ) -> RestResult<RestResponse> {
        let arg = arg.ok_or(RestError::MissingId)?;
        let id = parse_id(arg)?;

        match self.lookup(id, context).await? {
            Lookup::Found(model) => {
                let cascade = model.delete_list();
                let mut targets = vec![model];
                targets.extend(cascade);
                self.datastore
                    .delete(targets)
                    .await
                    .map_err(datastore_error)?;
                Ok(RestResponse::empty())
            }
            Lookup::NotFound | Lookup::Unauthorized => Ok(RestResponse::not_found()),
        }
    }

    /// Decorate the save set, commit both sets, and respond with the stored
    /// primary record's Jsonable.
    async fn commit_and_respond(
        &self,
        save: Vec<H::Model>,
        delete: Vec<H::Model>,
        template: Option<&crate::template::Template>,
    ) -> RestResult<RestResponse> {
        let save = decorate_all(save);
        let stored = self.datastore.put(save).await.map_err(datastore_error)?;
        self.datastore.delete(delete).await.map_err(datastore_error)?;

        let primary = stored
            .into_iter()
            .next()
            .ok_or_else(|| RestError::Datastore("put returned no records".to_string()))?;
        let jsonable = to_jsonable(&primary, template)?;
        Ok(RestResponse::json(&jsonable)?)
    }

    async fn lookup(&self, id: i64, context: &RequestContext) -> RestResult<Lookup<H::Model>> {
        match self
            .datastore
            .get_by_id(id)
            .await
            .map_err(datastore_error)?
        {
            None => Ok(Lookup::NotFound),
            Some(model) if !self.handler.is_authorized(&model, context) => {
                Ok(Lookup::Unauthorized)
            }
            Some(model) => Ok(Lookup::Found(model)),
        }
    }

    fn fail(
        &self,
        resource: &str,
        verb: &str,
        error: RestError,
        context: &RequestContext,
    ) -> RestResponse {
        log::error!(
            "{verb} {resource} failed: {} (kind: {}, request: '{}')",
            error,
            error.kind_name(),
            context.request_id
        );
        RestResponse::error(&error)
    }
}

/// Run the decoration hook over the save set, in order. Models a hook emits
/// are appended after the existing entries and decorated in turn, so the
/// primary record stays first and cascaded records are post-processed too.
fn decorate_all<M: Model>(mut save: Vec<M>) -> Vec<M> {
    let mut index = 0;
    while index < save.len() {
        let extra = save[index].decorate();
        save.extend(extra);
        index += 1;
    }
    save
}

fn parse_id(arg: &str) -> RestResult<i64> {
    arg.parse().map_err(|_| RestError::InvalidId)
}

fn datastore_error<E: std::error::Error>(error: E) -> RestError {
    RestError::Datastore(error.to_string())
}
