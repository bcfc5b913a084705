use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::catalog::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest, GetMemberCommandResponse};
use crate::catalog::command::get_summary_cmd::{GetSummaryCommand, GetSummaryCommandRequest, GetSummaryCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::list_members_cmd::{ListMembersCommand, ListMembersCommandRequest, ListMembersCommandResponse};
use crate::catalog::command::query_overdue_cmd::{QueryOverdueCommand, QueryOverdueCommandRequest, QueryOverdueCommandResponse};
use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/books", post(add_book).get(list_books))
        .route("/books/:id", get(find_book_by_id))
        .route("/members", post(add_member).get(list_members))
        .route("/members/:id", get(find_member_by_id))
        .route("/loans", post(borrow_book))
        .route("/loans/return", post(return_book))
        .route("/loans/overdue", get(query_overdue))
        .route("/summary", get(get_summary))
        .with_state(state)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest { book_id };
    let res = GetBookCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(req): Query<ListBooksCommandRequest>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddMemberCommandResponse>, ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddMemberCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<String>) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let req = GetMemberCommandRequest { member_id };
    let res = GetMemberCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_members(
    State(state): State<AppState>) -> Result<Json<ListMembersCommandResponse>, ServerError> {
    let res = ListMembersCommand::new(state.service).execute(ListMembersCommandRequest {}).await?;
    Ok(Json(res))
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = BorrowBookCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ReturnBookCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_overdue(
    State(state): State<AppState>) -> Result<Json<QueryOverdueCommandResponse>, ServerError> {
    let req = QueryOverdueCommandRequest { as_of: Utc::now().naive_utc() };
    let res = QueryOverdueCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn get_summary(
    State(state): State<AppState>) -> Result<Json<GetSummaryCommandResponse>, ServerError> {
    let res = GetSummaryCommand::new(state.service).execute(GetSummaryCommandRequest {}).await?;
    Ok(Json(res))
}
